use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

use super::*;

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroserviceKubernetes {
    pub api_version: String,
    pub metadata: CloudResourceMetadata,
    pub spec: MicroserviceKubernetesSpec,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroserviceKubernetesSpec {
    /// Doubles as the name of the kubernetes service, so it has to be a valid dns label.
    pub version: String,
    pub container: MicroserviceKubernetesContainer,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<MicroserviceKubernetesAvailability>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressSpec>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroserviceKubernetesContainer {
    pub app: MicroserviceKubernetesContainerApp,
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MicroserviceKubernetesContainerApp {
    pub image: Option<ContainerImage>,
    pub resources: ContainerResources,
    pub env: Option<MicroserviceKubernetesContainerAppEnv>,
    pub ports: Vec<MicroserviceKubernetesContainerAppPort>,
}

impl Default for MicroserviceKubernetesContainerApp {
    fn default() -> Self {
        MicroserviceKubernetesContainerApp {
            image: None,
            resources: ContainerResources::new(CpuMemory::new("2000m", "2Gi"), CpuMemory::new("100m", "100Mi")),
            env: None,
            ports: vec![],
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerImage {
    pub repo: String,
    pub tag: String,
}

impl ContainerImage {
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repo, self.tag)
    }
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MicroserviceKubernetesContainerAppEnv {
    pub variables: BTreeMap<String, String>,
    pub secrets: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MicroserviceKubernetesContainerAppPort {
    pub name: String,
    pub container_port: i32,
    pub network_protocol: String,
    pub app_protocol: String,
    pub service_port: i32,
    pub is_ingress_port: bool,
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroserviceKubernetesAvailability {
    pub min_replicas: i32,
}

impl Default for MicroserviceKubernetesAvailability {
    fn default() -> Self {
        MicroserviceKubernetesAvailability { min_replicas: 1 }
    }
}

pub type MicroserviceKubernetesStackInput = StackInput<MicroserviceKubernetes, KubernetesProviderConfig>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MicroserviceKubernetesStackOutputs {
    pub namespace: String,
    pub service: String,
    pub kube_endpoint: String,
    pub port_forward_command: String,
    pub ingress_external_hostname: Option<String>,
    pub ingress_internal_hostname: Option<String>,
}
