use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

pub const KUBERNETES_API_VERSION: &str = "kubernetes.project-planton.org/v1";
pub const GCP_API_VERSION: &str = "gcp.project-planton.org/v1";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProviderFamily {
    Kubernetes,
    Gcp,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, JsonSchema, Ord, PartialEq, PartialOrd, Serialize)]
pub enum CloudResourceKind {
    GcpArtifactRegistryRepo,
    KafkaKubernetes,
    MicroserviceKubernetes,
    PostgresKubernetes,
    RedisKubernetes,
}

impl CloudResourceKind {
    pub const ALL: [CloudResourceKind; 5] = [
        CloudResourceKind::GcpArtifactRegistryRepo,
        CloudResourceKind::KafkaKubernetes,
        CloudResourceKind::MicroserviceKubernetes,
        CloudResourceKind::PostgresKubernetes,
        CloudResourceKind::RedisKubernetes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudResourceKind::GcpArtifactRegistryRepo => "GcpArtifactRegistryRepo",
            CloudResourceKind::KafkaKubernetes => "KafkaKubernetes",
            CloudResourceKind::MicroserviceKubernetes => "MicroserviceKubernetes",
            CloudResourceKind::PostgresKubernetes => "PostgresKubernetes",
            CloudResourceKind::RedisKubernetes => "RedisKubernetes",
        }
    }

    // GCP label values only allow lowercase letters, digits, '_' and '-'
    pub fn snake_name(&self) -> &'static str {
        match self {
            CloudResourceKind::GcpArtifactRegistryRepo => "gcp_artifact_registry_repo",
            CloudResourceKind::KafkaKubernetes => "kafka_kubernetes",
            CloudResourceKind::MicroserviceKubernetes => "microservice_kubernetes",
            CloudResourceKind::PostgresKubernetes => "postgres_kubernetes",
            CloudResourceKind::RedisKubernetes => "redis_kubernetes",
        }
    }

    pub fn family(&self) -> ProviderFamily {
        match self {
            CloudResourceKind::GcpArtifactRegistryRepo => ProviderFamily::Gcp,
            _ => ProviderFamily::Kubernetes,
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self.family() {
            ProviderFamily::Kubernetes => KUBERNETES_API_VERSION,
            ProviderFamily::Gcp => GCP_API_VERSION,
        }
    }
}

impl fmt::Display for CloudResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CloudResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CloudResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s) || k.snake_name() == s)
            .ok_or(format!("unknown cloud resource kind: {s}"))
    }
}
