use std::collections::BTreeMap;

use pp_api::v1::*;
use rstest::fixture;

use crate::constants::*;

#[fixture]
pub fn test_metadata(#[default(TEST_NAME)] name: &str) -> CloudResourceMetadata {
    CloudResourceMetadata {
        name: name.into(),
        id: TEST_ID.into(),
        org: TEST_ORG.into(),
        env: TEST_ENV.into(),
        ..Default::default()
    }
}

#[fixture]
pub fn test_redis(test_metadata: CloudResourceMetadata) -> RedisKubernetes {
    RedisKubernetes {
        api_version: KUBERNETES_API_VERSION.into(),
        metadata: test_metadata,
        spec: RedisKubernetesSpec {
            container: RedisKubernetesContainer {
                is_persistence_enabled: true,
                disk_size: "10Gi".into(),
                ..Default::default()
            },
            ingress: None,
        },
    }
}

#[fixture]
pub fn test_postgres(test_metadata: CloudResourceMetadata) -> PostgresKubernetes {
    PostgresKubernetes {
        api_version: KUBERNETES_API_VERSION.into(),
        metadata: test_metadata,
        spec: PostgresKubernetesSpec::default(),
    }
}

#[fixture]
pub fn test_kafka(test_metadata: CloudResourceMetadata) -> KafkaKubernetes {
    KafkaKubernetes {
        api_version: KUBERNETES_API_VERSION.into(),
        metadata: test_metadata,
        spec: KafkaKubernetesSpec {
            kafka_topics: vec![KafkaTopic::new("orders"), KafkaTopic::new("payments.v1")],
            ..Default::default()
        },
    }
}

#[fixture]
pub fn test_microservice(test_metadata: CloudResourceMetadata) -> MicroserviceKubernetes {
    MicroserviceKubernetes {
        api_version: KUBERNETES_API_VERSION.into(),
        metadata: test_metadata,
        spec: MicroserviceKubernetesSpec {
            version: TEST_VERSION.into(),
            container: MicroserviceKubernetesContainer {
                app: MicroserviceKubernetesContainerApp {
                    image: Some(ContainerImage { repo: TEST_IMAGE_REPO.into(), tag: TEST_IMAGE_TAG.into() }),
                    env: Some(MicroserviceKubernetesContainerAppEnv {
                        variables: BTreeMap::from([("LOG_LEVEL".into(), "info".into())]),
                        secrets: BTreeMap::from([("DB_PASSWORD".into(), "hunter2".into())]),
                    }),
                    ports: vec![MicroserviceKubernetesContainerAppPort {
                        name: "rest-api".into(),
                        container_port: 8080,
                        network_protocol: "TCP".into(),
                        app_protocol: "http".into(),
                        service_port: 80,
                        is_ingress_port: true,
                    }],
                    ..Default::default()
                },
            },
            availability: None,
            ingress: None,
        },
    }
}

#[fixture]
pub fn test_artifact_registry_repo(test_metadata: CloudResourceMetadata) -> GcpArtifactRegistryRepo {
    GcpArtifactRegistryRepo {
        api_version: GCP_API_VERSION.into(),
        metadata: test_metadata,
        spec: GcpArtifactRegistryRepoSpec {
            project_id: TEST_GCP_PROJECT.into(),
            region: TEST_GCP_REGION.into(),
            repo_format: ArtifactRegistryRepoFormat::Docker,
            enable_public_access: false,
        },
    }
}
