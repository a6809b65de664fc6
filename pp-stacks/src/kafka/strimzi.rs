use std::collections::BTreeMap;

use kube::api::{
    NotUsed,
    TypeMeta,
};
use pp_core::k8s::build_object_meta;
use pp_core::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::json;
use sha1::{
    Digest,
    Sha1,
};

use super::*;

// The parts of the Strimzi Kafka, KafkaUser and KafkaTopic CRDs that we populate

pub const STRIMZI_API_VERSION: &str = "kafka.strimzi.io/v1beta2";
pub const STRIMZI_CLUSTER_LABEL_KEY: &str = "strimzi.io/cluster";

const KAFKA_KIND: &str = "Kafka";
const KAFKA_USER_KIND: &str = "KafkaUser";
const KAFKA_TOPIC_KIND: &str = "KafkaTopic";

const SCRAM_SHA_512: &str = "scram-sha-512";
const PERSISTENT_CLAIM: &str = "persistent-claim";

const MAX_OBJECT_NAME_LEN: usize = 253;
const TOPIC_DIGEST_LEN: usize = 8;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaSpec {
    pub kafka: KafkaClusterSpec,
    pub zookeeper: ZookeeperClusterSpec,
    pub entity_operator: EntityOperatorSpec,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaClusterSpec {
    pub replicas: i32,
    pub listeners: Vec<KafkaListener>,
    pub authorization: KafkaAuthorization,
    pub config: BTreeMap<String, serde_json::Value>,
    pub storage: JbodStorage,
    pub resources: corev1::ResourceRequirements,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaListener {
    pub name: String,
    pub port: i32,
    #[serde(rename = "type")]
    pub type_: String,
    pub tls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<ListenerAuthentication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ListenerConfiguration>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ListenerAuthentication {
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerConfiguration {
    pub bootstrap: BootstrapOverride,
    pub brokers: Vec<BrokerOverride>,
    pub broker_cert_chain_and_key: CertAndKeySecretSource,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BootstrapOverride {
    pub annotations: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerOverride {
    pub broker: i32,
    pub advertised_host: String,
    pub advertised_port: i32,
    pub annotations: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertAndKeySecretSource {
    pub secret_name: String,
    pub certificate: String,
    pub key: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaAuthorization {
    #[serde(rename = "type")]
    pub type_: String,
    pub super_users: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct JbodStorage {
    #[serde(rename = "type")]
    pub type_: String,
    pub volumes: Vec<PersistentClaimStorage>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentClaimStorage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "type")]
    pub type_: String,
    pub size: String,
    pub delete_claim: bool,
}

impl PersistentClaimStorage {
    fn new(id: Option<i32>, size: &str) -> PersistentClaimStorage {
        PersistentClaimStorage {
            id,
            type_: PERSISTENT_CLAIM.into(),
            size: size.into(),
            delete_claim: false,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZookeeperClusterSpec {
    pub replicas: i32,
    pub storage: PersistentClaimStorage,
    pub resources: corev1::ResourceRequirements,
}

// Both operators run with their default settings; an empty object is enough to enable them
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityOperatorSpec {
    pub topic_operator: serde_json::Value,
    pub user_operator: serde_json::Value,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct KafkaUserSpec {
    pub authentication: ListenerAuthentication,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTopicSpec {
    pub topic_name: String,
    pub partitions: i32,
    pub replicas: i32,
    pub config: BTreeMap<String, String>,
}

pub type Kafka = kube::api::Object<KafkaSpec, NotUsed>;
pub type KafkaUser = kube::api::Object<KafkaUserSpec, NotUsed>;
pub type KafkaTopicResource = kube::api::Object<KafkaTopicSpec, NotUsed>;

fn strimzi_types(kind: &str) -> Option<TypeMeta> {
    Some(TypeMeta {
        api_version: STRIMZI_API_VERSION.into(),
        kind: kind.into(),
    })
}

fn cluster_labels(locals: &Locals) -> BTreeMap<String, String> {
    let mut labels = locals.labels.clone();
    labels.insert(STRIMZI_CLUSTER_LABEL_KEY.into(), locals.cluster_name.clone());
    labels
}

pub fn default_cluster_config() -> BTreeMap<String, serde_json::Value> {
    BTreeMap::from([
        ("offsets.topic.replication.factor".into(), json!(1)),
        ("transaction.state.log.replication.factor".into(), json!(1)),
        ("transaction.state.log.min.isr".into(), json!(1)),
        ("auto.create.topics.enable".into(), json!(true)),
    ])
}

pub fn default_topic_config() -> BTreeMap<String, String> {
    [
        ("cleanup.policy", "delete"),
        ("delete.retention.ms", "86400000"),
        ("max.message.bytes", "2097164"),
        ("message.timestamp.difference.max.ms", "9223372036854775807"),
        ("message.timestamp.type", "CreateTime"),
        ("min.insync.replicas", "1"),
        ("retention.bytes", "-1"),
        ("retention.ms", "604800000"),
        ("segment.bytes", "1073741824"),
        ("segment.ms", "604800000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.into(), v.into()))
    .collect()
}

fn load_balancer_annotations(load_balancer_type: Option<&str>, hostname: &str) -> BTreeMap<String, String> {
    let mut annotations = BTreeMap::from([(EXTERNAL_DNS_HOSTNAME_ANNOTATION_KEY.into(), hostname.into())]);
    if let Some(lb_type) = load_balancer_type {
        annotations.insert(GCP_LOAD_BALANCER_TYPE_ANNOTATION_KEY.into(), lb_type.into());
    }
    annotations
}

fn load_balancer_listener(
    name: &str,
    port: i32,
    load_balancer_type: Option<&str>,
    bootstrap_hostname: &str,
    broker_hostnames: &[String],
) -> KafkaListener {
    let brokers = broker_hostnames
        .iter()
        .enumerate()
        .map(|(i, host)| BrokerOverride {
            broker: i as i32,
            advertised_host: host.clone(),
            // Every load balancer listener advertises 9092, the private 9093 listener included;
            // clients of existing clusters connect with that port
            advertised_port: EXTERNAL_PUBLIC_LISTENER_PORT,
            annotations: load_balancer_annotations(load_balancer_type, host),
        })
        .collect();

    KafkaListener {
        name: name.into(),
        port,
        type_: "loadbalancer".into(),
        tls: true,
        authentication: Some(ListenerAuthentication { type_: SCRAM_SHA_512.into() }),
        configuration: Some(ListenerConfiguration {
            bootstrap: BootstrapOverride {
                annotations: load_balancer_annotations(load_balancer_type, bootstrap_hostname),
            },
            brokers,
            broker_cert_chain_and_key: CertAndKeySecretSource {
                secret_name: BROKER_INGRESS_CERT_SECRET_NAME.into(),
                certificate: "tls.crt".into(),
                key: "tls.key".into(),
            },
        }),
    }
}

// The internal listener is always present; with ingress, clients in the VPC use the private
// load balancer listener and everyone else the public one.  Each bootstrap server hands out
// the broker hostnames of its own listener.
pub fn build_listeners(locals: &Locals) -> Vec<KafkaListener> {
    let mut listeners = vec![KafkaListener {
        name: INTERNAL_LISTENER_NAME.into(),
        port: INTERNAL_LISTENER_PORT,
        type_: "internal".into(),
        tls: false,
        authentication: Some(ListenerAuthentication { type_: SCRAM_SHA_512.into() }),
        configuration: None,
    }];

    if let Some(ingress) = &locals.ingress {
        let (private_lb, public_lb) = if locals.is_gke { (Some("Internal"), Some("External")) } else { (None, None) };
        listeners.push(load_balancer_listener(
            EXTERNAL_PRIVATE_LISTENER_NAME,
            EXTERNAL_PRIVATE_LISTENER_PORT,
            private_lb,
            &ingress.bootstrap_internal_hostname,
            &ingress.broker_internal_hostnames,
        ));
        listeners.push(load_balancer_listener(
            EXTERNAL_PUBLIC_LISTENER_NAME,
            EXTERNAL_PUBLIC_LISTENER_PORT,
            public_lb,
            &ingress.bootstrap_external_hostname,
            &ingress.broker_external_hostnames,
        ));
    }
    listeners
}

pub fn build_kafka(locals: &Locals, spec: &KafkaKubernetesSpec) -> Kafka {
    let broker = &spec.broker_container;
    let zookeeper = &spec.zookeeper_container;

    Kafka {
        types: strimzi_types(KAFKA_KIND),
        metadata: build_object_meta(&locals.namespace, &locals.cluster_name, &locals.labels),
        spec: KafkaSpec {
            kafka: KafkaClusterSpec {
                replicas: broker.replicas,
                listeners: build_listeners(locals),
                authorization: KafkaAuthorization {
                    type_: "simple".into(),
                    super_users: vec![ADMIN_USERNAME.into()],
                },
                config: default_cluster_config(),
                storage: JbodStorage {
                    type_: "jbod".into(),
                    volumes: vec![PersistentClaimStorage::new(Some(0), &broker.disk_size)],
                },
                resources: (&broker.resources).into(),
            },
            zookeeper: ZookeeperClusterSpec {
                replicas: zookeeper.replicas,
                storage: PersistentClaimStorage::new(None, &zookeeper.disk_size),
                resources: (&zookeeper.resources).into(),
            },
            entity_operator: EntityOperatorSpec {
                topic_operator: json!({}),
                user_operator: json!({}),
            },
        },
        status: None,
    }
}

// The user operator writes the credentials to a secret named after the user
pub fn build_admin_user(locals: &Locals) -> KafkaUser {
    KafkaUser {
        types: strimzi_types(KAFKA_USER_KIND),
        metadata: build_object_meta(&locals.namespace, ADMIN_USERNAME, &cluster_labels(locals)),
        spec: KafkaUserSpec {
            authentication: ListenerAuthentication { type_: SCRAM_SHA_512.into() },
        },
        status: None,
    }
}

// Kafka topic names may contain '.' and '_' and upper case letters, none of which are welcome
// in an object name.  When the name has to change, a digest of the raw name keeps topics like
// orders_v1 and orders.v1 apart.
pub fn topic_resource_name(topic_name: &str) -> String {
    let sanitized: String = topic_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    if sanitized == topic_name {
        return sanitized;
    }

    let digest = format!("{:x}", Sha1::digest(topic_name.as_bytes()));
    let prefix_len = sanitized.len().min(MAX_OBJECT_NAME_LEN - TOPIC_DIGEST_LEN - 1);
    format!("{}-{}", sanitized[..prefix_len].trim_end_matches('-'), &digest[..TOPIC_DIGEST_LEN])
}

pub fn build_topic(locals: &Locals, topic: &KafkaTopic) -> KafkaTopicResource {
    let mut config = default_topic_config();
    config.extend(topic.config.clone());

    KafkaTopicResource {
        types: strimzi_types(KAFKA_TOPIC_KIND),
        metadata: build_object_meta(&locals.namespace, &topic_resource_name(&topic.name), &cluster_labels(locals)),
        spec: KafkaTopicSpec {
            topic_name: topic.name.clone(),
            partitions: topic.partitions,
            replicas: topic.replicas,
            config,
        },
        status: None,
    }
}
