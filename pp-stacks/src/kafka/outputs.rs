pub const NAMESPACE: &str = "namespace";
pub const USERNAME: &str = "username";
pub const PASSWORD_SECRET_NAME: &str = "password-secret-name";
pub const PASSWORD_SECRET_KEY: &str = "password-secret-key";
pub const BOOTSTRAP_SERVER_EXTERNAL_HOSTNAME: &str = "bootstrap-server-external-hostname";
pub const BOOTSTRAP_SERVER_INTERNAL_HOSTNAME: &str = "bootstrap-server-internal-hostname";
pub const SCHEMA_REGISTRY_EXTERNAL_URL: &str = "schema-registry-external-url";
pub const SCHEMA_REGISTRY_INTERNAL_URL: &str = "schema-registry-internal-url";
pub const KAFKA_UI_EXTERNAL_URL: &str = "kafka-ui-external-url";
