use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

use super::*;

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresKubernetes {
    pub api_version: String,
    pub metadata: CloudResourceMetadata,
    pub spec: PostgresKubernetesSpec,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresKubernetesSpec {
    #[serde(default)]
    pub container: PostgresKubernetesContainer,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressSpec>,
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostgresKubernetesContainer {
    pub replicas: i32,
    pub resources: ContainerResources,
    pub disk_size: String,
}

impl Default for PostgresKubernetesContainer {
    fn default() -> Self {
        PostgresKubernetesContainer {
            replicas: 1,
            resources: ContainerResources::new(CpuMemory::new("1000m", "1Gi"), CpuMemory::new("50m", "100Mi")),
            disk_size: "1Gi".into(),
        }
    }
}

pub type PostgresKubernetesStackInput = StackInput<PostgresKubernetes, KubernetesProviderConfig>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PostgresKubernetesStackOutputs {
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
