use std::fs::File;

use serde::de::DeserializeOwned;
use tracing::*;

use crate::errors::*;

// Provider configs are optional: without a file every field takes its default, which means
// "use the ambient kubeconfig" or "read the token from the environment"
pub fn load_provider_config<T: DeserializeOwned + Default>(path: Option<&str>) -> anyhow::Result<T> {
    match path {
        Some(path) => {
            debug!("loading provider config from {path}");
            let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
            Ok(serde_yaml::from_reader(file).with_context(|| format!("failed to parse {path}"))?)
        },
        None => Ok(T::default()),
    }
}
