use std::collections::BTreeMap;

use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuMemory {
    pub cpu: String,
    pub memory: String,
}

impl CpuMemory {
    pub fn new(cpu: &str, memory: &str) -> CpuMemory {
        CpuMemory { cpu: cpu.into(), memory: memory.into() }
    }

    fn to_quantities(&self) -> BTreeMap<String, Quantity> {
        BTreeMap::from([
            ("cpu".into(), Quantity(self.cpu.clone())),
            ("memory".into(), Quantity(self.memory.clone())),
        ])
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerResources {
    pub limits: CpuMemory,
    pub requests: CpuMemory,
}

impl ContainerResources {
    pub fn new(limits: CpuMemory, requests: CpuMemory) -> ContainerResources {
        ContainerResources { limits, requests }
    }
}

impl From<&ContainerResources> for corev1::ResourceRequirements {
    fn from(res: &ContainerResources) -> Self {
        corev1::ResourceRequirements {
            limits: Some(res.limits.to_quantities()),
            requests: Some(res.requests.to_quantities()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    #[serde(default, alias = "isEnabled")]
    pub enabled: bool,

    #[serde(default)]
    pub dns_domain: String,
}

impl IngressSpec {
    pub fn new(dns_domain: &str) -> IngressSpec {
        IngressSpec { enabled: true, dns_domain: dns_domain.into() }
    }
}

// Ingress resources are only created when ingress is enabled _and_ a domain is provided
pub fn active_ingress_domain(ingress: &Option<IngressSpec>) -> Option<&str> {
    match ingress {
        Some(IngressSpec { enabled: true, dns_domain }) if !dns_domain.is_empty() => Some(dns_domain.as_str()),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KubernetesProvider {
    GcpGke,
    AwsEks,
    AzureAks,
    DigitalOcean,
    Kind,
    #[default]
    Other,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesProviderConfig {
    #[serde(default)]
    pub provider: KubernetesProvider,

    // path to a kubeconfig file; the ambient configuration is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}
