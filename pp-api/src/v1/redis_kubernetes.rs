use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

use super::*;

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisKubernetes {
    pub api_version: String,
    pub metadata: CloudResourceMetadata,
    pub spec: RedisKubernetesSpec,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisKubernetesSpec {
    #[serde(default)]
    pub container: RedisKubernetesContainer,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressSpec>,
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedisKubernetesContainer {
    pub replicas: i32,
    pub resources: ContainerResources,

    /// When enabled, in-memory data is persisted to a volume and restored between pod restarts.
    pub is_persistence_enabled: bool,

    /// Size of the volume attached to each redis pod.  Only meaningful when persistence is
    /// enabled; it cannot be changed after creation since statefulset volume claims are
    /// immutable.
    pub disk_size: String,
}

impl Default for RedisKubernetesContainer {
    fn default() -> Self {
        RedisKubernetesContainer {
            replicas: 1,
            resources: ContainerResources::new(CpuMemory::new("1000m", "1Gi"), CpuMemory::new("50m", "100Mi")),
            is_persistence_enabled: false,
            disk_size: String::new(),
        }
    }
}

pub type RedisKubernetesStackInput = StackInput<RedisKubernetes, KubernetesProviderConfig>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RedisKubernetesStackOutputs {
    pub namespace: String,
    pub service: String,
    pub kube_endpoint: String,
    pub port_forward_command: String,
    pub username: String,
    pub password_secret_name: String,
    pub password_secret_key: String,
    pub ingress_external_hostname: Option<String>,
    pub ingress_internal_hostname: Option<String>,
}
