use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpProviderConfig {
    // OAuth2 access token; falls back to GOOGLE_OAUTH_ACCESS_TOKEN when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}
