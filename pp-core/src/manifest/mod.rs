use std::fs;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use serde_yaml::{
    Mapping,
    Value,
};
use tracing::*;
use url::Url;

use crate::errors::*;
use crate::prelude::*;
use crate::validation::{
    Validate,
    ValidationErrors,
};

err_impl! {ManifestError,
    #[error("unknown cloud resource kind: {0}")]
    UnknownKind(String),

    #[error("invalid --set expression `{0}`: expected path.to.field=value, with keys containing dots in double quotes")]
    InvalidOverride(String),

    #[error("cannot set {0}: an intermediate field is not a mapping")]
    OverrideConflict(String),
}

// A manifest is one resource of any supported kind, tagged by its `kind` field
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Manifest {
    GcpArtifactRegistryRepo(GcpArtifactRegistryRepo),
    KafkaKubernetes(KafkaKubernetes),
    MicroserviceKubernetes(MicroserviceKubernetes),
    PostgresKubernetes(PostgresKubernetes),
    RedisKubernetes(RedisKubernetes),
}

impl Manifest {
    pub fn from_value(mut value: Value) -> anyhow::Result<Manifest> {
        let Some(Value::String(name)) = value.get("kind") else {
            bail!("manifest is missing the kind field");
        };
        let kind = CloudResourceKind::from_str(name).map_err(|_| ManifestError::unknown_kind(name))?;

        // kinds are matched case-insensitively, so write back the canonical spelling
        value["kind"] = Value::from(kind.as_str());
        Ok(serde_yaml::from_value(value).with_context(|| format!("invalid {kind} manifest"))?)
    }

    pub fn kind(&self) -> CloudResourceKind {
        match self {
            Manifest::GcpArtifactRegistryRepo(_) => CloudResourceKind::GcpArtifactRegistryRepo,
            Manifest::KafkaKubernetes(_) => CloudResourceKind::KafkaKubernetes,
            Manifest::MicroserviceKubernetes(_) => CloudResourceKind::MicroserviceKubernetes,
            Manifest::PostgresKubernetes(_) => CloudResourceKind::PostgresKubernetes,
            Manifest::RedisKubernetes(_) => CloudResourceKind::RedisKubernetes,
        }
    }

    pub fn metadata(&self) -> &CloudResourceMetadata {
        match self {
            Manifest::GcpArtifactRegistryRepo(r) => &r.metadata,
            Manifest::KafkaKubernetes(r) => &r.metadata,
            Manifest::MicroserviceKubernetes(r) => &r.metadata,
            Manifest::PostgresKubernetes(r) => &r.metadata,
            Manifest::RedisKubernetes(r) => &r.metadata,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Manifest::GcpArtifactRegistryRepo(r) => r.validate(),
            Manifest::KafkaKubernetes(r) => r.validate(),
            Manifest::MicroserviceKubernetes(r) => r.validate(),
            Manifest::PostgresKubernetes(r) => r.validate(),
            Manifest::RedisKubernetes(r) => r.validate(),
        }
    }
}

pub async fn read_source(source: &str) -> anyhow::Result<String> {
    match Url::parse(source) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            debug!("fetching manifest from {url}");
            let resp = reqwest::get(url).await?.error_for_status()?;
            Ok(resp.text().await?)
        },
        _ => fs::read_to_string(source).with_context(|| format!("failed to read {source}")),
    }
}

// Splits `a."b.c".d=value` into its path keys and the raw value.  Dots and equals signs inside
// double quotes belong to the key; returns None for unterminated quotes or empty keys.
fn parse_override(expr: &str) -> Option<(Vec<String>, &str)> {
    let mut keys = vec![];
    let mut key = String::new();
    let mut quoted = false;
    let mut in_quotes = false;

    for (i, c) in expr.char_indices() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            },
            _ if in_quotes => key.push(c),
            '.' | '=' => {
                if key.is_empty() {
                    return None;
                }
                keys.push(std::mem::take(&mut key));
                quoted = false;
                if c == '=' {
                    return Some((keys, &expr[i + 1..]));
                }
            },
            _ if quoted => return None,
            _ => key.push(c),
        }
    }
    None
}

// `spec.container.replicas=3` sets a (possibly new) field; the value is parsed as YAML so
// numbers and booleans keep their type.  Map keys with dots in them are written in double quotes,
// e.g. `metadata.labels."kubernetes.project-planton.org/namespace"=team-a`
pub fn apply_override(root: &mut Value, expr: &str) -> EmptyResult {
    let Some((keys, raw)) = parse_override(expr) else {
        bail!(ManifestError::invalid_override(expr));
    };
    let path = keys.join(".");

    let new_value: Value = if raw.is_empty() { Value::String("".into()) } else { serde_yaml::from_str(raw)? };

    let mut node = root;
    for key in &keys[..keys.len() - 1] {
        if node.is_null() {
            *node = Value::Mapping(Mapping::new());
        }
        let Value::Mapping(map) = node else {
            bail!(ManifestError::override_conflict(&path));
        };
        node = map.entry(Value::from(key.as_str())).or_insert(Value::Null);
    }

    if node.is_null() {
        *node = Value::Mapping(Mapping::new());
    }
    let Value::Mapping(map) = node else {
        bail!(ManifestError::override_conflict(&path));
    };
    map.insert(Value::from(keys[keys.len() - 1].as_str()), new_value);
    Ok(())
}

pub async fn load_manifest(source: &str, overrides: &[String]) -> anyhow::Result<Manifest> {
    let contents = read_source(source).await?;
    let mut value: Value = serde_yaml::from_str(&contents).with_context(|| format!("failed to parse {source}"))?;
    for expr in overrides {
        apply_override(&mut value, expr)?;
    }
    Manifest::from_value(value)
}

#[cfg(test)]
mod tests;
