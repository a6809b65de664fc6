use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

use super::*;

pub const KAFKA_DEFAULT_DISK_SIZE: &str = "1Gi";

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaKubernetes {
    pub api_version: String,
    pub metadata: CloudResourceMetadata,
    pub spec: KafkaKubernetesSpec,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaKubernetesSpec {
    #[serde(default)]
    pub kafka_topics: Vec<KafkaTopic>,

    #[serde(default)]
    pub broker_container: KafkaKubernetesBrokerContainer,

    #[serde(default)]
    pub zookeeper_container: KafkaKubernetesZookeeperContainer,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_registry_container: Option<KafkaKubernetesSchemaRegistryContainer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressSpec>,

    #[serde(default)]
    pub is_deploy_kafka_ui: bool,
}

impl KafkaKubernetesSpec {
    pub fn is_schema_registry_enabled(&self) -> bool {
        self.schema_registry_container.as_ref().is_some_and(|c| c.is_enabled)
    }
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KafkaTopic {
    pub name: String,
    pub partitions: i32,
    pub replicas: i32,

    /// Topic-level configuration; keys not set here fall back to the stack's defaults.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
}

impl KafkaTopic {
    pub fn new(name: &str) -> KafkaTopic {
        KafkaTopic { name: name.into(), ..Default::default() }
    }
}

impl Default for KafkaTopic {
    fn default() -> Self {
        KafkaTopic {
            name: String::new(),
            partitions: 1,
            replicas: 1,
            config: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KafkaKubernetesBrokerContainer {
    pub replicas: i32,
    pub resources: ContainerResources,
    pub disk_size: String,
}

impl Default for KafkaKubernetesBrokerContainer {
    fn default() -> Self {
        KafkaKubernetesBrokerContainer {
            replicas: 1,
            resources: ContainerResources::new(CpuMemory::new("1000m", "1Gi"), CpuMemory::new("50m", "100Mi")),
            disk_size: KAFKA_DEFAULT_DISK_SIZE.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KafkaKubernetesZookeeperContainer {
    pub replicas: i32,
    pub resources: ContainerResources,
    pub disk_size: String,
}

impl Default for KafkaKubernetesZookeeperContainer {
    fn default() -> Self {
        KafkaKubernetesZookeeperContainer {
            replicas: 1,
            resources: ContainerResources::new(CpuMemory::new("1000m", "1Gi"), CpuMemory::new("50m", "100Mi")),
            disk_size: KAFKA_DEFAULT_DISK_SIZE.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KafkaKubernetesSchemaRegistryContainer {
    pub is_enabled: bool,
    pub replicas: i32,
    pub resources: ContainerResources,
}

impl Default for KafkaKubernetesSchemaRegistryContainer {
    fn default() -> Self {
        KafkaKubernetesSchemaRegistryContainer {
            is_enabled: false,
            replicas: 1,
            resources: ContainerResources::new(CpuMemory::new("1000m", "1Gi"), CpuMemory::new("50m", "100Mi")),
        }
    }
}

pub type KafkaKubernetesStackInput = StackInput<KafkaKubernetes, KubernetesProviderConfig>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct KafkaKubernetesStackOutputs {
    pub namespace: String,
    pub username: String,
    pub password_secret_name: String,
    pub password_secret_key: String,
    pub bootstrap_server_external_hostname: Option<String>,
    pub bootstrap_server_internal_hostname: Option<String>,
    pub schema_registry_external_url: Option<String>,
    pub schema_registry_internal_url: Option<String>,
    pub kafka_ui_external_url: Option<String>,
}
