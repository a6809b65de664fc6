use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

// Named outputs of one provisioning run; keys are the durable contract consumed by
// downstream automation, so they're kept sorted for stable printing
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StackOutputs(BTreeMap<String, String>);

impl StackOutputs {
    pub fn export(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn to_typed<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_value(serde_json::to_value(&self.0)?)?)
    }
}
