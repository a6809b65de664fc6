use assert_fs::prelude::*;
use assertables::*;
use pp_testutils::*;

use super::*;

#[rstest]
fn test_resource_labels_full(test_metadata: CloudResourceMetadata) {
    let labels = resource_labels(&test_metadata, CloudResourceKind::RedisKubernetes);
    assert_eq!(
        labels,
        BTreeMap::from([
            ("project-planton.org/resource".to_string(), "true".to_string()),
            ("project-planton.org/resource-name".into(), TEST_NAME.into()),
            ("project-planton.org/resource-kind".into(), "RedisKubernetes".into()),
            ("project-planton.org/resource-id".into(), TEST_ID.into()),
            ("project-planton.org/organization".into(), TEST_ORG.into()),
            ("project-planton.org/environment".into(), TEST_ENV.into()),
        ])
    );
}

#[rstest]
fn test_resource_labels_minimal() {
    let labels = resource_labels(&CloudResourceMetadata::new("foo"), CloudResourceKind::KafkaKubernetes);
    assert_len_eq_x!(&labels, 3);
    assert!(!labels.contains_key(RESOURCE_ID_LABEL_KEY));
    assert!(!labels.contains_key(ORGANIZATION_LABEL_KEY));
}

#[rstest]
fn test_resource_labels_idempotent(test_metadata: CloudResourceMetadata) {
    assert_eq!(
        resource_labels(&test_metadata, CloudResourceKind::PostgresKubernetes),
        resource_labels(&test_metadata, CloudResourceKind::PostgresKubernetes),
    );
}

#[rstest]
fn test_gcp_resource_labels(test_metadata: CloudResourceMetadata) {
    let labels = gcp_resource_labels(&test_metadata, CloudResourceKind::GcpArtifactRegistryRepo);
    assert_eq!(labels["resource_kind"], "gcp_artifact_registry_repo");
    assert_eq!(labels["resource_name"], TEST_NAME);
    assert_eq!(labels["organization"], TEST_ORG);
    assert!(labels.keys().all(|k| !k.contains('/') && !k.contains('-')));
}

#[rstest]
#[case::name_only(None, None, "the-resource")]
#[case::override_label(Some("custom-ns"), None, "custom-ns")]
#[case::stack_input(None, Some("input-ns"), "input-ns")]
#[case::stack_input_wins(Some("custom-ns"), Some("input-ns"), "input-ns")]
#[case::empty_stack_input(Some("custom-ns"), Some(""), "custom-ns")]
#[case::empty_label(Some(""), None, "the-resource")]
fn test_resolve_namespace(
    mut test_metadata: CloudResourceMetadata,
    #[case] label: Option<&str>,
    #[case] stack_input_ns: Option<&str>,
    #[case] expected: &str,
) {
    if let Some(label) = label {
        test_metadata.labels.insert(NAMESPACE_OVERRIDE_LABEL_KEY.into(), label.into());
    }
    assert_eq!(resolve_namespace(&test_metadata, stack_input_ns), expected);
}

#[rstest]
fn test_service_helpers() {
    assert_eq!(kube_service_fqdn("main", "the-app"), "main.the-app.svc.cluster.local");
    assert_eq!(
        port_forward_command("the-app", "main", 8080),
        "kubectl port-forward -n the-app service/main 8080:8080"
    );
    assert_eq!(
        ingress_hostnames("the-app", "example.com"),
        ("the-app.example.com".to_string(), "the-app-internal.example.com".to_string())
    );
}

#[rstest]
#[case("kafka-bootstrap.example.com", "example.com")]
#[case("a.b.c", "b.c")]
#[case("localhost", "")]
fn test_extract_domain_from_hostname(#[case] hostname: &str, #[case] expected: &str) {
    assert_eq!(extract_domain_from_hostname(hostname), expected);
}

#[rstest]
fn test_docker_config_json_inline_wins(mut test_metadata: CloudResourceMetadata) {
    test_metadata
        .labels
        .insert(DOCKER_CONFIG_JSON_FILE_LABEL_KEY.into(), "/does/not/exist".into());
    let res = load_docker_config_json(&test_metadata, Some("{\"auths\":{}}")).unwrap();
    assert_eq!(res.as_deref(), Some("{\"auths\":{}}"));
}

#[rstest]
fn test_docker_config_json_from_file(mut test_metadata: CloudResourceMetadata) {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("config.json");
    file.write_str("{\"auths\":{\"gcr.io\":{}}}").unwrap();

    test_metadata
        .labels
        .insert(DOCKER_CONFIG_JSON_FILE_LABEL_KEY.into(), file.path().to_string_lossy().into());
    let res = load_docker_config_json(&test_metadata, None).unwrap();
    assert_eq!(res.as_deref(), Some("{\"auths\":{\"gcr.io\":{}}}"));
}

#[rstest]
fn test_docker_config_json_missing_file(mut test_metadata: CloudResourceMetadata) {
    test_metadata
        .labels
        .insert(DOCKER_CONFIG_JSON_FILE_LABEL_KEY.into(), "/does/not/exist.json".into());
    let err = load_docker_config_json(&test_metadata, None).unwrap_err();
    assert_contains!(format!("{err:#}"), "failed to read /does/not/exist.json");
}

#[rstest]
fn test_docker_config_json_absent(test_metadata: CloudResourceMetadata) {
    assert_none!(load_docker_config_json(&test_metadata, None).unwrap());
}
