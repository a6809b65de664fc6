mod locals;
pub mod outputs;

pub use locals::*;
use pp_core::errors::*;
use pp_core::prelude::*;
use pp_core::providers::GcpResource;

pub const READER_ROLE: &str = "roles/artifactregistry.reader";
pub const WRITER_ROLE: &str = "roles/artifactregistry.writer";
pub const REPO_ADMIN_ROLE: &str = "roles/artifactregistry.repoAdmin";

// "allUsers" is the IAM principal for everyone, authenticated or not
pub const ALL_USERS_MEMBER: &str = "allUsers";

fn service_account(locals: &Locals, account_id: &str, purpose: &str) -> GcpResource {
    GcpResource::ServiceAccount {
        project: locals.project_id.clone(),
        account_id: account_id.into(),
        display_name: format!("{} {purpose}", locals.repo_name),
    }
}

fn iam_member(locals: &Locals, role: &str, member: String) -> GcpResource {
    GcpResource::RepositoryIamMember {
        project: locals.project_id.clone(),
        location: locals.region.clone(),
        repository: locals.repo_name.clone(),
        role: role.into(),
        member,
    }
}

pub async fn resources(ctx: &mut StackContext, input: &GcpArtifactRegistryRepoStackInput) -> EmptyResult {
    let locals = initialize_locals(ctx, input);
    let spec = &input.target.spec;

    let reader = match &locals.reader_account_id {
        Some(account_id) => Some(
            ctx.gcp(service_account(&locals, account_id, "reader"), ResourceOptions::default())
                .await
                .context("failed to create reader service account")?,
        ),
        None => None,
    };
    let writer = ctx
        .gcp(service_account(&locals, &locals.writer_account_id, "writer"), ResourceOptions::default())
        .await
        .context("failed to create writer service account")?;

    let repo = GcpResource::ArtifactRegistryRepository {
        project: locals.project_id.clone(),
        location: locals.region.clone(),
        repository_id: locals.repo_name.clone(),
        format: spec.repo_format.to_string(),
        labels: locals.labels.clone(),
    };
    let repo = ctx
        .gcp(repo, ResourceOptions::default())
        .await
        .context("failed to create repo")?;

    match (&reader, locals.reader_service_account_email()) {
        (Some(reader), Some(email)) => {
            ctx.gcp(
                iam_member(&locals, READER_ROLE, format!("serviceAccount:{email}")),
                ResourceOptions::default().depends_on(&repo).depends_on(reader),
            )
            .await
            .context("failed to grant reader role on repo for reader service account")?;
        },
        _ => {
            ctx.gcp(
                iam_member(&locals, READER_ROLE, ALL_USERS_MEMBER.into()),
                ResourceOptions::default().depends_on(&repo),
            )
            .await
            .context("failed to grant reader role on repo for all users")?;
        },
    }

    let writer_member = format!("serviceAccount:{}", locals.writer_service_account_email());
    ctx.gcp(
        iam_member(&locals, WRITER_ROLE, writer_member.clone()),
        ResourceOptions::default().depends_on(&repo).depends_on(&writer),
    )
    .await
    .context("failed to grant writer role on repo for writer service account")?;

    ctx.gcp(
        iam_member(&locals, REPO_ADMIN_ROLE, writer_member),
        ResourceOptions::default().depends_on(&repo).depends_on(&writer),
    )
    .await
    .context("failed to grant repoAdmin role on repo for writer service account")?;

    Ok(())
}

#[cfg(test)]
mod tests;
