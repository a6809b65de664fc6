use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::*;

use crate::errors::*;
use crate::prelude::*;

pub const KUBE_SERVICE_DOMAIN: &str = "svc.cluster.local";

// Base labels are always present; the id/org/env labels only when the metadata carries them
pub fn resource_labels(metadata: &CloudResourceMetadata, kind: CloudResourceKind) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::from([
        (RESOURCE_LABEL_KEY.to_string(), "true".to_string()),
        (RESOURCE_NAME_LABEL_KEY.to_string(), metadata.name.clone()),
        (RESOURCE_KIND_LABEL_KEY.to_string(), kind.as_str().to_string()),
    ]);

    for (key, val) in [
        (RESOURCE_ID_LABEL_KEY, &metadata.id),
        (ORGANIZATION_LABEL_KEY, &metadata.org),
        (ENVIRONMENT_LABEL_KEY, &metadata.env),
    ] {
        if !val.is_empty() {
            labels.insert(key.into(), val.clone());
        }
    }
    labels
}

// GCP label keys may not contain '/' or '.', so the prefix is dropped and the kind is given
// in snake case
pub fn gcp_resource_labels(metadata: &CloudResourceMetadata, kind: CloudResourceKind) -> BTreeMap<String, String> {
    resource_labels(metadata, kind)
        .into_iter()
        .map(|(k, v)| {
            let key = k.trim_start_matches(LABEL_PREFIX).replace('-', "_");
            let val = if k == RESOURCE_KIND_LABEL_KEY { kind.snake_name().into() } else { v };
            (key, val)
        })
        .collect()
}

// Later sources win: the resource name, then the override label, then the namespace given
// on the stack input
pub fn resolve_namespace(metadata: &CloudResourceMetadata, stack_input_namespace: Option<&str>) -> String {
    let mut namespace = metadata.name.as_str();
    if let Some(ns) = metadata.label(NAMESPACE_OVERRIDE_LABEL_KEY) {
        namespace = ns;
    }
    if let Some(ns) = stack_input_namespace.filter(|ns| !ns.is_empty()) {
        namespace = ns;
    }
    namespace.into()
}

pub fn kube_service_fqdn(service: &str, namespace: &str) -> String {
    format!("{service}.{namespace}.{KUBE_SERVICE_DOMAIN}")
}

pub fn port_forward_command(namespace: &str, service: &str, port: i32) -> String {
    format!("kubectl port-forward -n {namespace} service/{service} {port}:{port}")
}

pub fn ingress_hostnames(namespace: &str, domain: &str) -> (String, String) {
    (format!("{namespace}.{domain}"), format!("{namespace}-internal.{domain}"))
}

// "a.b.example.com" -> "b.example.com"; a bare label has no domain
pub fn extract_domain_from_hostname(hostname: &str) -> String {
    match hostname.split_once('.') {
        Some((_, domain)) => domain.into(),
        None => String::new(),
    }
}

fn expand_home(path: &str) -> anyhow::Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => Ok(dirs::home_dir().ok_or(anyhow!("could not determine home directory"))?.join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}

// An image pull secret can be given inline on the stack input or as a file named by a label
// on the resource; the inline value takes precedence
pub fn load_docker_config_json(
    metadata: &CloudResourceMetadata,
    stack_input_value: Option<&str>,
) -> anyhow::Result<Option<String>> {
    if let Some(val) = stack_input_value.filter(|v| !v.is_empty()) {
        return Ok(Some(val.into()));
    }

    let Some(path) = metadata.label(DOCKER_CONFIG_JSON_FILE_LABEL_KEY) else {
        return Ok(None);
    };
    let path = expand_home(path)?;
    debug!("reading docker config json from {}", path.display());
    let contents = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Some(contents))
}

#[cfg(test)]
mod tests;
