use std::collections::BTreeMap;

use pp_core::locals::gcp_resource_labels;
use pp_core::prelude::*;
use pp_core::providers::service_account_email;

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Locals {
    pub project_id: String,
    pub region: String,
    pub repo_name: String,
    pub labels: BTreeMap<String, String>,
    pub repo_hostname: String,
    pub repo_url: String,
    // public repos are readable by everyone, so there is no reader account to hand out
    pub reader_account_id: Option<String>,
    pub writer_account_id: String,
}

impl Locals {
    pub fn new(input: &GcpArtifactRegistryRepoStackInput) -> Locals {
        let target = &input.target;
        let project_id = target.spec.project_id.clone();
        let repo_name = target.metadata.name.clone();
        let repo_hostname = format!("{}-docker.pkg.dev", target.spec.region);

        Locals {
            labels: gcp_resource_labels(&target.metadata, CloudResourceKind::GcpArtifactRegistryRepo),
            repo_url: format!("{repo_hostname}/{project_id}/{repo_name}"),
            reader_account_id: (!target.spec.enable_public_access).then(|| format!("{repo_name}-reader")),
            writer_account_id: format!("{repo_name}-writer"),
            region: target.spec.region.clone(),
            project_id,
            repo_name,
            repo_hostname,
        }
    }

    pub fn reader_service_account_email(&self) -> Option<String> {
        self.reader_account_id
            .as_ref()
            .map(|id| service_account_email(&self.project_id, id))
    }

    pub fn writer_service_account_email(&self) -> String {
        service_account_email(&self.project_id, &self.writer_account_id)
    }

    pub fn export(&self, ctx: &mut StackContext) {
        ctx.export(outputs::REPO_NAME, &self.repo_name);
        ctx.export(outputs::REPO_HOSTNAME, &self.repo_hostname);
        ctx.export(outputs::REPO_URL, &self.repo_url);
        if let Some(email) = self.reader_service_account_email() {
            ctx.export(outputs::READER_SERVICE_ACCOUNT_EMAIL, email);
        }
        ctx.export(outputs::WRITER_SERVICE_ACCOUNT_EMAIL, self.writer_service_account_email());
    }
}

pub fn initialize_locals(ctx: &mut StackContext, input: &GcpArtifactRegistryRepoStackInput) -> Locals {
    let locals = Locals::new(input);
    locals.export(ctx);
    locals
}
