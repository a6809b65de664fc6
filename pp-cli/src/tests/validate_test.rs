use assert_fs::prelude::*;
use assertables::*;
use pp_core::validation::ValidationErrors;

use super::validate::*;
use super::*;

pub(super) const REDIS_MANIFEST: &str = r#"
apiVersion: kubernetes.project-planton.org/v1
kind: RedisKubernetes
metadata:
  name: the-redis
spec:
  container:
    replicas: 1
    isPersistenceEnabled: true
    diskSize: 1Gi
"#;

pub(super) fn manifest_args(dir: &assert_fs::TempDir, overrides: &[&str]) -> ManifestArgs {
    let file = dir.child("redis.yaml");
    file.write_str(REDIS_MANIFEST).unwrap();
    ManifestArgs {
        manifest: file.path().to_string_lossy().into(),
        overrides: overrides.iter().map(|o| o.to_string()).collect(),
    }
}

#[rstest]
#[tokio::test]
async fn test_load_valid() {
    let dir = assert_fs::TempDir::new().unwrap();
    let manifest = manifest_args(&dir, &[]).load_valid().await.unwrap();
    assert_eq!(manifest.kind(), CloudResourceKind::RedisKubernetes);
    assert_eq!(manifest.metadata().name, "the-redis");
}

#[rstest]
#[tokio::test]
async fn test_load_valid_reports_violations() {
    let dir = assert_fs::TempDir::new().unwrap();
    let err = manifest_args(&dir, &["spec.container.diskSize="]).load_valid().await.unwrap_err();

    assert!(err.downcast_ref::<ValidationErrors>().is_some());
    assert_contains!(err.to_string(), "[spec.container.disk_size.required]");
}

#[rstest]
#[tokio::test]
async fn test_cmd_missing_manifest() {
    let args = Args {
        manifest: ManifestArgs { manifest: "/does/not/exist.yaml".into(), overrides: vec![] },
    };
    let err = validate::cmd(&args).await.unwrap_err();
    assert_contains!(format!("{err:#}"), "/does/not/exist.yaml");
}
