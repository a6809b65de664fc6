use const_format::concatcp;

// Label keys stamped onto every resource this tool creates
pub const LABEL_PREFIX: &str = "project-planton.org/";
pub const RESOURCE_LABEL_KEY: &str = concatcp!(LABEL_PREFIX, "resource");
pub const RESOURCE_NAME_LABEL_KEY: &str = concatcp!(LABEL_PREFIX, "resource-name");
pub const RESOURCE_KIND_LABEL_KEY: &str = concatcp!(LABEL_PREFIX, "resource-kind");
pub const RESOURCE_ID_LABEL_KEY: &str = concatcp!(LABEL_PREFIX, "resource-id");
pub const ORGANIZATION_LABEL_KEY: &str = concatcp!(LABEL_PREFIX, "organization");
pub const ENVIRONMENT_LABEL_KEY: &str = concatcp!(LABEL_PREFIX, "environment");

// Labels users set on metadata to steer provisioning
pub const NAMESPACE_OVERRIDE_LABEL_KEY: &str = "kubernetes.project-planton.org/namespace";
pub const DOCKER_CONFIG_JSON_FILE_LABEL_KEY: &str = "kubernetes.project-planton.org/docker-config-json-file";

// Well-known annotations
pub const EXTERNAL_DNS_HOSTNAME_ANNOTATION_KEY: &str = "external-dns.alpha.kubernetes.io/hostname";
pub const GCP_LOAD_BALANCER_TYPE_ANNOTATION_KEY: &str = "cloud.google.com/load-balancer-type";
pub const APP_KUBERNETES_IO_NAME_KEY: &str = "app.kubernetes.io/name";

// Server-side apply
pub const FIELD_MANAGER: &str = "project-planton";

// Ingress infrastructure that is expected to already exist on the cluster
pub const ISTIO_INGRESS_NAMESPACE: &str = "istio-ingress";
pub const ISTIO_GATEWAY_CLASS: &str = "istio";
pub const ISTIO_INGRESS_GATEWAY_SERVICE: &str = "istio-ingress-gateway.istio-ingress.svc.cluster.local";
pub const ISTIO_INTERNAL_INGRESS_GATEWAY_SERVICE: &str = "istio-ingress-gateway-internal.istio-ingress.svc.cluster.local";
pub const CLUSTER_ISSUER_KIND: &str = "ClusterIssuer";

// Env vars
pub const GCP_ACCESS_TOKEN_ENV_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

// Endpoints
pub const ARTIFACT_REGISTRY_API_URL: &str = "https://artifactregistry.googleapis.com";
pub const IAM_API_URL: &str = "https://iam.googleapis.com";

// Kinds
pub const NAMESPACE_KIND: &str = "Namespace";
pub const SECRET_KIND: &str = "Secret";
pub const SERVICE_KIND: &str = "Service";
