use assertables::*;
use pp_core::stack::DesiredResource;
use pp_testutils::*;

use super::*;

fn urns(ctx: &StackContext) -> Vec<&str> {
    ctx.planned().iter().map(|r| r.urn.as_str()).collect()
}

#[rstest]
fn test_locals(test_artifact_registry_repo: GcpArtifactRegistryRepo) {
    let input = GcpArtifactRegistryRepoStackInput::new(test_artifact_registry_repo);
    let locals = Locals::new(&input);

    assert_eq!(locals.repo_hostname, "us-central1-docker.pkg.dev");
    assert_eq!(locals.repo_url, "us-central1-docker.pkg.dev/the-project/the-resource");
    assert_eq!(locals.reader_account_id.as_deref(), Some("the-resource-reader"));
    assert_eq!(
        locals.reader_service_account_email().as_deref(),
        Some("the-resource-reader@the-project.iam.gserviceaccount.com")
    );
    assert_eq!(locals.writer_service_account_email(), "the-resource-writer@the-project.iam.gserviceaccount.com");
    assert_eq!(locals.labels.get("resource_kind").map(String::as_str), Some("gcp_artifact_registry_repo"));
}

#[rstest]
fn test_locals_public(mut test_artifact_registry_repo: GcpArtifactRegistryRepo) {
    test_artifact_registry_repo.spec.enable_public_access = true;
    let locals = Locals::new(&GcpArtifactRegistryRepoStackInput::new(test_artifact_registry_repo));
    assert_none!(locals.reader_account_id);
    assert_none!(locals.reader_service_account_email());
}

#[rstest]
#[tokio::test]
async fn test_resources_private(test_artifact_registry_repo: GcpArtifactRegistryRepo) {
    let input = GcpArtifactRegistryRepoStackInput::new(test_artifact_registry_repo);
    let mut ctx = StackContext::dry_run("test");
    resources(&mut ctx, &input).await.unwrap();

    assert_eq!(
        urns(&ctx),
        vec![
            "gcp:iam/ServiceAccount::the-project/the-resource-reader",
            "gcp:iam/ServiceAccount::the-project/the-resource-writer",
            "gcp:artifactregistry/Repository::the-project/us-central1/the-resource",
            "gcp:artifactregistry/RepositoryIamMember::the-resource/roles/artifactregistry.reader/serviceAccount:the-resource-reader@the-project.iam.gserviceaccount.com",
            "gcp:artifactregistry/RepositoryIamMember::the-resource/roles/artifactregistry.writer/serviceAccount:the-resource-writer@the-project.iam.gserviceaccount.com",
            "gcp:artifactregistry/RepositoryIamMember::the-resource/roles/artifactregistry.repoAdmin/serviceAccount:the-resource-writer@the-project.iam.gserviceaccount.com",
        ]
    );

    let planned = ctx.planned();
    assert_eq!(planned[3].depends_on, vec![planned[2].urn.clone(), planned[0].urn.clone()]);
    assert_eq!(planned[4].depends_on, vec![planned[2].urn.clone(), planned[1].urn.clone()]);

    let DesiredResource::Gcp(GcpResource::ArtifactRegistryRepository { format, labels, .. }) = &planned[2].resource
    else {
        panic!("expected a repository, got {:?}", planned[2].resource);
    };
    assert_eq!(format, "DOCKER");
    assert!(labels.contains_key("resource_id"));

    let outputs: GcpArtifactRegistryRepoStackOutputs = ctx.outputs().to_typed().unwrap();
    assert_eq!(outputs.repo_name, TEST_NAME);
    assert_eq!(
        outputs.reader_service_account_email.as_deref(),
        Some("the-resource-reader@the-project.iam.gserviceaccount.com")
    );
}

#[rstest]
#[tokio::test]
async fn test_resources_public(mut test_artifact_registry_repo: GcpArtifactRegistryRepo) {
    test_artifact_registry_repo.spec.enable_public_access = true;
    let input = GcpArtifactRegistryRepoStackInput::new(test_artifact_registry_repo);
    let mut ctx = StackContext::dry_run("test");
    resources(&mut ctx, &input).await.unwrap();

    assert_len_eq_x!(ctx.planned(), 5);
    assert_eq!(
        ctx.planned()[2].urn,
        "gcp:artifactregistry/RepositoryIamMember::the-resource/roles/artifactregistry.reader/allUsers"
    );
    assert_eq!(ctx.planned()[2].depends_on, vec![ctx.planned()[1].urn.clone()]);
    assert_none!(ctx.outputs().get(outputs::READER_SERVICE_ACCOUNT_EMAIL));
}
