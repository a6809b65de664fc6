pub const NAMESPACE: &str = "namespace";
pub const SERVICE: &str = "service";
pub const KUBE_ENDPOINT: &str = "kube-endpoint";
pub const PORT_FORWARD_COMMAND: &str = "port-forward-command";
pub const USERNAME: &str = "username";
pub const PASSWORD_SECRET_NAME: &str = "password-secret-name";
pub const PASSWORD_SECRET_KEY: &str = "password-secret-key";
pub const INGRESS_EXTERNAL_HOSTNAME: &str = "ingress-external-hostname";
pub const INGRESS_INTERNAL_HOSTNAME: &str = "ingress-internal-hostname";
