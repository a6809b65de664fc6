use std::fmt;

use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

use super::*;

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpArtifactRegistryRepo {
    pub api_version: String,
    pub metadata: CloudResourceMetadata,
    pub spec: GcpArtifactRegistryRepoSpec,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactRegistryRepoFormat {
    #[default]
    Docker,
    Generic,
    Maven,
    Npm,
    Python,
}

impl fmt::Display for ArtifactRegistryRepoFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ArtifactRegistryRepoFormat::Docker => "DOCKER",
            ArtifactRegistryRepoFormat::Generic => "GENERIC",
            ArtifactRegistryRepoFormat::Maven => "MAVEN",
            ArtifactRegistryRepoFormat::Npm => "NPM",
            ArtifactRegistryRepoFormat::Python => "PYTHON",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpArtifactRegistryRepoSpec {
    pub project_id: String,
    pub region: String,

    #[serde(default)]
    pub repo_format: ArtifactRegistryRepoFormat,

    /// Grants read access to `allUsers`; private repos grant it to a dedicated reader
    /// service account instead.
    #[serde(default)]
    pub enable_public_access: bool,
}

pub type GcpArtifactRegistryRepoStackInput = StackInput<GcpArtifactRegistryRepo, GcpProviderConfig>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GcpArtifactRegistryRepoStackOutputs {
    pub repo_name: String,
    pub repo_hostname: String,
    pub repo_url: String,
    pub reader_service_account_email: Option<String>,
    pub writer_service_account_email: String,
}
