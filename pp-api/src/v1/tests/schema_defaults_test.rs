use super::*;

#[rstest]
fn test_redis_container_defaults() {
    let redis: RedisKubernetes = serde_yaml::from_str(
        r#"
apiVersion: kubernetes.project-planton.org/v1
metadata:
  name: cache
spec:
  container:
    isPersistenceEnabled: true
    diskSize: 5Gi
"#,
    )
    .unwrap();

    assert_eq!(redis.spec.container.replicas, 1);
    assert_eq!(redis.spec.container.resources.limits, CpuMemory::new("1000m", "1Gi"));
    assert_eq!(redis.spec.container.disk_size, "5Gi");
    assert!(redis.spec.ingress.is_none());
}

#[rstest]
fn test_kafka_defaults_and_ingress_alias() {
    let kafka: KafkaKubernetes = serde_yaml::from_str(
        r#"
apiVersion: kubernetes.project-planton.org/v1
metadata:
  name: events
spec:
  kafkaTopics:
    - name: orders
  ingress:
    isEnabled: true
    dnsDomain: example.com
"#,
    )
    .unwrap();

    assert_eq!(kafka.spec.broker_container.disk_size, KAFKA_DEFAULT_DISK_SIZE);
    assert_eq!(kafka.spec.zookeeper_container.disk_size, KAFKA_DEFAULT_DISK_SIZE);
    assert_eq!(kafka.spec.kafka_topics[0].partitions, 1);
    assert!(!kafka.spec.is_schema_registry_enabled());
    assert_eq!(active_ingress_domain(&kafka.spec.ingress), Some("example.com"));
}

#[rstest]
fn test_metadata_id_fallback() {
    let mut md = CloudResourceMetadata::new("the-name");
    assert_eq!(md.id_or_name(), "the-name");

    md.id = "the-id".into();
    assert_eq!(md.id_or_name(), "the-id");
}

#[rstest]
fn test_repo_format_roundtrip_name() {
    let spec: GcpArtifactRegistryRepoSpec =
        serde_yaml::from_str("projectId: p\nregion: us-central1\nrepoFormat: PYTHON\n").unwrap();
    assert_eq!(spec.repo_format, ArtifactRegistryRepoFormat::Python);
    assert_eq!(spec.repo_format.to_string(), "PYTHON");
}
