use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::json;
use tracing::*;
use url::Url;

use super::*;
use crate::prelude::*;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GcpResource {
    ArtifactRegistryRepository {
        project: String,
        location: String,
        repository_id: String,
        format: String,
        labels: BTreeMap<String, String>,
    },
    ServiceAccount {
        project: String,
        account_id: String,
        display_name: String,
    },
    RepositoryIamMember {
        project: String,
        location: String,
        repository: String,
        role: String,
        member: String,
    },
}

impl GcpResource {
    pub fn urn(&self) -> String {
        match self {
            GcpResource::ArtifactRegistryRepository { project, location, repository_id, .. } => {
                format!("gcp:artifactregistry/Repository::{project}/{location}/{repository_id}")
            },
            GcpResource::ServiceAccount { project, account_id, .. } => {
                format!("gcp:iam/ServiceAccount::{project}/{account_id}")
            },
            GcpResource::RepositoryIamMember { repository, role, member, .. } => {
                format!("gcp:artifactregistry/RepositoryIamMember::{repository}/{role}/{member}")
            },
        }
    }
}

pub fn service_account_email(project: &str, account_id: &str) -> String {
    format!("{account_id}@{project}.iam.gserviceaccount.com")
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IamBinding {
    pub role: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IamPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<IamBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl IamPolicy {
    // Returns true if the policy changed
    pub fn add_member(&mut self, role: &str, member: &str) -> bool {
        match self.bindings.iter_mut().find(|b| b.role == role) {
            Some(binding) if binding.members.iter().any(|m| m == member) => false,
            Some(binding) => {
                binding.members.push(member.into());
                true
            },
            None => {
                self.bindings.push(IamBinding { role: role.into(), members: vec![member.into()] });
                true
            },
        }
    }
}

const DEFAULT_OPERATION_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_MAX_OPERATION_POLLS: usize = 60;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OperationStatus {
    pub code: Option<i32>,
    #[serde(default)]
    pub message: String,
}

// google.longrunning.Operation, minus the metadata and response payloads we never look at
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub error: Option<OperationStatus>,
}

impl Operation {
    // Ok(true) once the operation finished successfully
    fn is_done(&self) -> anyhow::Result<bool> {
        match &self.error {
            Some(status) => bail!(ProviderError::gcp_api(&format!(
                "operation {} failed (code {}): {}",
                self.name,
                status.code.unwrap_or_default(),
                status.message
            ))),
            None => Ok(self.done),
        }
    }
}

#[derive(Debug)]
pub struct GcpRestProvider {
    http: reqwest::Client,
    access_token: String,
    artifact_registry_url: String,
    iam_url: String,
    poll_interval: Duration,
    max_polls: usize,
}

impl GcpRestProvider {
    pub fn new(access_token: &str) -> GcpRestProvider {
        GcpRestProvider {
            http: reqwest::Client::new(),
            access_token: access_token.into(),
            artifact_registry_url: ARTIFACT_REGISTRY_API_URL.into(),
            iam_url: IAM_API_URL.into(),
            poll_interval: DEFAULT_OPERATION_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_OPERATION_POLLS,
        }
    }

    pub fn from_config(config: &GcpProviderConfig) -> anyhow::Result<GcpRestProvider> {
        let token = match &config.access_token {
            Some(token) if !token.is_empty() => token.clone(),
            _ => std::env::var(GCP_ACCESS_TOKEN_ENV_VAR)
                .map_err(|_| ProviderError::missing_gcp_token(GCP_ACCESS_TOKEN_ENV_VAR))?,
        };
        Ok(GcpRestProvider::new(&token))
    }

    pub fn with_base_urls(mut self, artifact_registry_url: &str, iam_url: &str) -> GcpRestProvider {
        self.artifact_registry_url = artifact_registry_url.trim_end_matches('/').into();
        self.iam_url = iam_url.trim_end_matches('/').into();
        self
    }

    pub fn with_operation_polling(mut self, poll_interval: Duration, max_polls: usize) -> GcpRestProvider {
        self.poll_interval = poll_interval;
        self.max_polls = max_polls;
        self
    }

    async fn ensure_repository(
        &self,
        project: &str,
        location: &str,
        repository_id: &str,
        format: &str,
        labels: &BTreeMap<String, String>,
    ) -> EmptyResult {
        let collection = format!("{}/v1/projects/{project}/locations/{location}/repositories", self.artifact_registry_url);
        let resp = self.get(&format!("{collection}/{repository_id}")).await?;
        if resp.status() != StatusCode::NOT_FOUND {
            return check_status(resp).await.map(|_| debug!("repository {repository_id} already exists"));
        }

        let mut url = Url::parse(&collection)?;
        url.query_pairs_mut().append_pair("repositoryId", repository_id);
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&json!({"format": format, "labels": labels}))
            .send()
            .await?;
        let op: Operation = check_status(resp).await?.json().await?;
        self.wait_for_operation(op).await
    }

    // Repository creation is a long-running operation; the repository can't take IAM bindings
    // until the operation is done
    async fn wait_for_operation(&self, mut op: Operation) -> EmptyResult {
        for _ in 0..self.max_polls {
            if op.is_done()? {
                debug!("operation {} is done", op.name);
                return Ok(());
            }
            if op.name.is_empty() {
                bail!(ProviderError::gcp_api("pending operation has no name"));
            }

            debug!("waiting for operation {}", op.name);
            tokio::time::sleep(self.poll_interval).await;
            let resp = check_status(self.get(&format!("{}/v1/{}", self.artifact_registry_url, op.name)).await?).await?;
            op = resp.json().await?;
        }

        if op.is_done()? {
            return Ok(());
        }
        bail!(ProviderError::gcp_api(&format!("operation {} not done after {} polls", op.name, self.max_polls)))
    }

    async fn ensure_service_account(&self, project: &str, account_id: &str, display_name: &str) -> EmptyResult {
        let collection = format!("{}/v1/projects/{project}/serviceAccounts", self.iam_url);
        let email = service_account_email(project, account_id);
        let resp = self.get(&format!("{collection}/{email}")).await?;
        if resp.status() != StatusCode::NOT_FOUND {
            return check_status(resp).await.map(|_| debug!("service account {email} already exists"));
        }

        let resp = self
            .http
            .post(&collection)
            .bearer_auth(&self.access_token)
            .json(&json!({"accountId": account_id, "serviceAccount": {"displayName": display_name}}))
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    // IAM members are additive: read the policy, add the binding, and write it back with the
    // etag we read so that a concurrent writer makes us fail instead of clobbering them
    async fn add_repository_iam_member(
        &self,
        project: &str,
        location: &str,
        repository: &str,
        role: &str,
        member: &str,
    ) -> EmptyResult {
        let resource = format!(
            "{}/v1/projects/{project}/locations/{location}/repositories/{repository}",
            self.artifact_registry_url
        );
        let resp = check_status(self.get(&format!("{resource}:getIamPolicy")).await?).await?;
        let mut policy: IamPolicy = resp.json().await?;
        if !policy.add_member(role, member) {
            debug!("{member} already has {role} on {repository}");
            return Ok(());
        }

        let resp = self
            .http
            .post(format!("{resource}:setIamPolicy"))
            .bearer_auth(&self.access_token)
            .json(&json!({ "policy": policy }))
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn get(&self, url: &str) -> anyhow::Result<reqwest::Response> {
        Ok(self.http.get(url).bearer_auth(&self.access_token).send().await?)
    }
}

async fn check_status(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    bail!(ProviderError::gcp_api(&format!("{status}: {body}")))
}

#[async_trait]
impl GcpProvider for GcpRestProvider {
    async fn apply(&self, resource: &GcpResource) -> EmptyResult {
        match resource {
            GcpResource::ArtifactRegistryRepository { project, location, repository_id, format, labels } => {
                self.ensure_repository(project, location, repository_id, format, labels).await
            },
            GcpResource::ServiceAccount { project, account_id, display_name } => {
                self.ensure_service_account(project, account_id, display_name).await
            },
            GcpResource::RepositoryIamMember { project, location, repository, role, member } => {
                self.add_repository_iam_member(project, location, repository, role, member).await
            },
        }
    }
}
