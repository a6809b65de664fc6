use pp_api::v1::CloudResourceKind;
use serde::{
    Serialize,
    Serializer,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Constraint {
    pub id: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CloudResourceKind>,

    #[serde(serialize_with = "flatten_str")]
    pub help: &'static str,
}

impl Constraint {
    pub fn help(&self) -> String {
        self.help.replace('\n', " ")
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.map(|k| k.as_str()).unwrap_or("*")
    }
}

fn flatten_str<S: Serializer>(s: &str, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&s.replace('\n', " "))
}

macro_rules! constraint {
    ($name:ident, $id:literal, $kind:expr, $help:literal) => {
        pub const $name: Constraint = Constraint { id: $id, kind: $kind, help: $help };
    };
}

constraint!(METADATA_NAME_REQUIRED, "metadata.name.required", None, "Every resource needs a name.");

constraint!(
    API_VERSION_CONST,
    "api_version.const",
    None,
    r#"The apiVersion must match the provider family of the kind:
kubernetes.project-planton.org/v1 or gcp.project-planton.org/v1."#
);

constraint!(
    REDIS_DISK_SIZE_REQUIRED,
    "spec.container.disk_size.required",
    Some(CloudResourceKind::RedisKubernetes),
    r#"When persistence is enabled the disk size is required and must be a
quantity such as 10Gi; when persistence is disabled it must be left empty."#
);

constraint!(
    KAFKA_BROKER_DISK_SIZE_FORMAT,
    "spec.broker_container.disk_size.format",
    Some(CloudResourceKind::KafkaKubernetes),
    "The broker disk size must be a quantity such as 1Gi."
);

constraint!(
    KAFKA_ZOOKEEPER_DISK_SIZE_FORMAT,
    "spec.zookeeper_container.disk_size.format",
    Some(CloudResourceKind::KafkaKubernetes),
    "The zookeeper disk size must be a quantity such as 1Gi."
);

constraint!(
    KAFKA_TOPIC_NAME,
    "spec.kafka_topics.name",
    Some(CloudResourceKind::KafkaKubernetes),
    r#"Topic names are at most 249 ASCII characters, start and end with an
alphanumeric character, contain only alphanumerics, '.', '_' and '-', and never
contain '..'."#
);

constraint!(
    KAFKA_TOPIC_PARTITIONS,
    "spec.kafka_topics.partitions.gte",
    Some(CloudResourceKind::KafkaKubernetes),
    "A topic needs at least one partition."
);

constraint!(
    KAFKA_TOPIC_REPLICAS,
    "spec.kafka_topics.replicas.gte",
    Some(CloudResourceKind::KafkaKubernetes),
    "A topic needs at least one replica."
);

constraint!(
    POSTGRES_DISK_SIZE_FORMAT,
    "spec.container.disk_size.format",
    Some(CloudResourceKind::PostgresKubernetes),
    "The database volume size must be a quantity such as 1Gi."
);

constraint!(
    MICROSERVICE_VERSION_FORMAT,
    "spec.version.format",
    Some(CloudResourceKind::MicroserviceKubernetes),
    r#"The version names the kubernetes service, so it must be a dns label of at
most 20 lowercase letters, numbers and hyphens that does not end with a hyphen."#
);

constraint!(
    MICROSERVICE_IMAGE_REQUIRED,
    "spec.container.app.image.required",
    Some(CloudResourceKind::MicroserviceKubernetes),
    "The container image repo and tag are both required."
);

constraint!(
    MICROSERVICE_PORT_NAME,
    "spec.container.app.ports.name",
    Some(CloudResourceKind::MicroserviceKubernetes),
    "Port names are lowercase alphanumerics and hyphens, starting and ending with an alphanumeric."
);

constraint!(
    MICROSERVICE_PORT_PROTOCOL,
    "spec.container.app.ports.network_protocol",
    Some(CloudResourceKind::MicroserviceKubernetes),
    "The network protocol of a port is one of SCTP, TCP or UDP."
);

constraint!(
    ARTIFACT_REGISTRY_PROJECT_REQUIRED,
    "spec.project_id.required",
    Some(CloudResourceKind::GcpArtifactRegistryRepo),
    "The GCP project that owns the repository is required."
);

constraint!(
    ARTIFACT_REGISTRY_REGION_REQUIRED,
    "spec.region.required",
    Some(CloudResourceKind::GcpArtifactRegistryRepo),
    "The GCP region of the repository is required."
);

constraint!(
    ARTIFACT_REGISTRY_NAME_FORMAT,
    "metadata.name.format",
    Some(CloudResourceKind::GcpArtifactRegistryRepo),
    r#"The repository name also names its reader and writer service accounts, so it
must be at most 23 lowercase letters, numbers and hyphens, start with a letter, and
not end with a hyphen."#
);

pub const ALL_CONSTRAINTS: &[Constraint] = &[
    METADATA_NAME_REQUIRED,
    API_VERSION_CONST,
    REDIS_DISK_SIZE_REQUIRED,
    KAFKA_BROKER_DISK_SIZE_FORMAT,
    KAFKA_ZOOKEEPER_DISK_SIZE_FORMAT,
    KAFKA_TOPIC_NAME,
    KAFKA_TOPIC_PARTITIONS,
    KAFKA_TOPIC_REPLICAS,
    POSTGRES_DISK_SIZE_FORMAT,
    MICROSERVICE_VERSION_FORMAT,
    MICROSERVICE_IMAGE_REQUIRED,
    MICROSERVICE_PORT_NAME,
    MICROSERVICE_PORT_PROTOCOL,
    ARTIFACT_REGISTRY_PROJECT_REQUIRED,
    ARTIFACT_REGISTRY_REGION_REQUIRED,
    ARTIFACT_REGISTRY_NAME_FORMAT,
];
