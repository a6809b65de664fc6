pub const TEST_NAME: &str = "the-resource";
pub const TEST_ID: &str = "res-12345";
pub const TEST_ORG: &str = "acme";
pub const TEST_ENV: &str = "dev";
pub const TEST_DOMAIN: &str = "example.com";
pub const TEST_GCP_PROJECT: &str = "the-project";
pub const TEST_GCP_REGION: &str = "us-central1";
pub const TEST_GCP_TOKEN: &str = "ya29.test-token";
pub const TEST_VERSION: &str = "main";
pub const TEST_IMAGE_REPO: &str = "us-central1-docker.pkg.dev/the-project/apps/the-app";
pub const TEST_IMAGE_TAG: &str = "v1.2.3";
