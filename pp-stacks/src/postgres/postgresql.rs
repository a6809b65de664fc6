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

// The subset of the zalando postgres-operator `postgresql` CRD that we populate

pub const ZALANDO_API_VERSION: &str = "acid.zalan.do/v1";
pub const POSTGRESQL_KIND: &str = "postgresql";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresqlSpec {
    pub team_id: String,
    pub number_of_instances: i32,
    pub postgresql: PostgresqlVersion,
    pub resources: PostgresqlResources,
    pub volume: PostgresqlVolume,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pod_annotations: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresqlVersion {
    pub version: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresqlResources {
    pub limits: CpuMemory,
    pub requests: CpuMemory,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresqlVolume {
    pub size: String,
}

pub type Postgresql = kube::api::Object<PostgresqlSpec, NotUsed>;

pub fn build_postgresql(
    namespace: &str,
    name: &str,
    labels: &BTreeMap<String, String>,
    resource_name: &str,
    container: &PostgresKubernetesContainer,
) -> Postgresql {
    Postgresql {
        types: Some(TypeMeta {
            api_version: ZALANDO_API_VERSION.into(),
            kind: POSTGRESQL_KIND.into(),
        }),
        metadata: build_object_meta(namespace, name, labels),
        spec: PostgresqlSpec {
            team_id: super::TEAM_ID.into(),
            number_of_instances: container.replicas,
            postgresql: PostgresqlVersion {
                version: super::POSTGRES_VERSION.into(),
                parameters: BTreeMap::from([("max_connections".into(), "200".into())]),
            },
            resources: PostgresqlResources {
                limits: container.resources.limits.clone(),
                requests: container.resources.requests.clone(),
            },
            volume: PostgresqlVolume { size: container.disk_size.clone() },
            pod_annotations: BTreeMap::from([("postgres-cluster-id".into(), resource_name.into())]),
        },
        status: None,
    }
}
