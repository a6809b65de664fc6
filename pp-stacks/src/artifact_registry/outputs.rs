pub const REPO_NAME: &str = "repo-name";
pub const REPO_HOSTNAME: &str = "repo-hostname";
pub const REPO_URL: &str = "repo-url";
pub const READER_SERVICE_ACCOUNT_EMAIL: &str = "reader-service-account-email";
pub const WRITER_SERVICE_ACCOUNT_EMAIL: &str = "writer-service-account-email";
