use assertables::*;
use pp_api::v1::*;
use pp_testutils::*;

use super::*;

#[rstest]
fn test_violation_display() {
    let v = Violation::new(&REDIS_DISK_SIZE_REQUIRED, "oops");
    assert_eq!(v.to_string(), "[spec.container.disk_size.required]: oops");
}

#[rstest]
fn test_redis_valid(test_redis: RedisKubernetes) {
    assert_ok!(test_redis.validate());
}

#[rstest]
#[case::persistence_empty(true, "", false)]
#[case::persistence_malformed(true, "10 gigs", false)]
#[case::persistence_ok(true, "10Gi", true)]
#[case::persistence_decimal(true, "1.5 Ti", true)]
#[case::no_persistence_empty(false, "", true)]
#[case::no_persistence_set(false, "10Gi", false)]
fn test_redis_disk_size(
    mut test_redis: RedisKubernetes,
    #[case] persistence: bool,
    #[case] disk_size: &str,
    #[case] valid: bool,
) {
    test_redis.spec.container.is_persistence_enabled = persistence;
    test_redis.spec.container.disk_size = disk_size.into();

    let msgs = messages(test_redis.validate());
    if valid {
        assert_is_empty!(msgs);
    } else {
        assert_eq!(
            msgs,
            vec!["[spec.container.disk_size.required]: Disk size is required and must match the format if persistence is enabled"]
        );
    }
}

#[rstest]
fn test_missing_name_and_api_version(mut test_redis: RedisKubernetes) {
    test_redis.metadata.name = "".into();
    test_redis.api_version = GCP_API_VERSION.into();

    let errs = test_redis.validate().unwrap_err();
    assert!(errs.has(&METADATA_NAME_REQUIRED));
    assert!(errs.has(&API_VERSION_CONST));
    assert_contains!(errs.to_string(), "[api_version.const]: value must equal `kubernetes.project-planton.org/v1`");
}

#[rstest]
fn test_postgres_disk_size(mut test_postgres: PostgresKubernetes) {
    assert_ok!(test_postgres.validate());

    test_postgres.spec.container.disk_size = "lots".into();
    let errs = test_postgres.validate().unwrap_err();
    assert!(errs.has(&POSTGRES_DISK_SIZE_FORMAT));
}

#[rstest]
fn test_artifact_registry_required(mut test_artifact_registry_repo: GcpArtifactRegistryRepo) {
    assert_ok!(test_artifact_registry_repo.validate());

    test_artifact_registry_repo.spec.project_id = "".into();
    test_artifact_registry_repo.spec.region = "".into();
    let errs = test_artifact_registry_repo.validate().unwrap_err();
    assert_len_eq_x!(errs.violations(), 2);
}

#[rstest]
#[case("1Gi", true)]
#[case("500Mi", true)]
#[case("10 G", true)]
#[case("2.5Ti", true)]
#[case("1gi", false)]
#[case("Gi", false)]
#[case("1.Gi", false)]
#[case("", false)]
fn test_disk_size_format(#[case] size: &str, #[case] valid: bool) {
    assert_eq!(is_valid_disk_size(size), valid);
}
