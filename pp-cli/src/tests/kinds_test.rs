use assertables::*;

use super::kinds::*;
use super::*;

#[rstest]
fn test_render_kinds() {
    let out = render_kinds();
    for kind in CloudResourceKind::ALL {
        assert_contains!(out, kind.as_str());
        assert_contains!(out, kind.api_version());
    }
}

#[rstest]
#[case::redis(CloudResourceKind::RedisKubernetes)]
#[case::artifact_registry(CloudResourceKind::GcpArtifactRegistryRepo)]
fn test_schema_for_kind(#[case] kind: CloudResourceKind) {
    let schema = serde_json::to_value(schema_for_kind(kind)).unwrap();
    assert!(schema["properties"]["spec"].is_object());
    assert!(schema["properties"]["metadata"].is_object());
}
