use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

// Common metadata attached to every cloud resource, regardless of kind
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudResourceMetadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub org: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub env: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl CloudResourceMetadata {
    pub fn new(name: &str) -> CloudResourceMetadata {
        CloudResourceMetadata { name: name.into(), ..Default::default() }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    // Resources created before ids were mandatory fall back to their name
    pub fn id_or_name(&self) -> &str {
        if self.id.is_empty() { &self.name } else { &self.id }
    }
}
