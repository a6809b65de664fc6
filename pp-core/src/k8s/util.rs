use std::collections::BTreeMap;

use kube::api::{
    DynamicObject,
    Resource,
};
use serde::Serialize;

use super::*;
use crate::errors::*;
use crate::prelude::*;

pub fn build_object_meta(namespace: &str, name: &str, labels: &BTreeMap<String, String>) -> metav1::ObjectMeta {
    metav1::ObjectMeta {
        namespace: Some(namespace.into()),
        name: Some(name.into()),
        labels: Some(labels.clone()),
        ..Default::default()
    }
}

pub fn build_global_object_meta(name: &str, labels: &BTreeMap<String, String>) -> metav1::ObjectMeta {
    metav1::ObjectMeta {
        name: Some(name.into()),
        labels: Some(labels.clone()),
        ..Default::default()
    }
}

pub fn build_namespace(name: &str, labels: &BTreeMap<String, String>) -> corev1::Namespace {
    corev1::Namespace {
        metadata: build_global_object_meta(name, labels),
        ..Default::default()
    }
}

pub fn build_opaque_secret(
    namespace: &str,
    name: &str,
    labels: &BTreeMap<String, String>,
    string_data: BTreeMap<String, String>,
) -> corev1::Secret {
    corev1::Secret {
        metadata: build_object_meta(namespace, name, labels),
        type_: Some("Opaque".into()),
        string_data: Some(string_data),
        ..Default::default()
    }
}

// Secrets we wrote carry stringData, secrets read back from the apiserver carry data
pub fn secret_value(secret: &corev1::Secret, key: &str) -> Option<String> {
    if let Some(bytes) = secret.data.as_ref().and_then(|d| d.get(key)) {
        return String::from_utf8(bytes.0.clone()).ok();
    }
    secret.string_data.as_ref().and_then(|d| d.get(key)).cloned()
}

// Everything the stack engine hands to a kubernetes provider is a DynamicObject; typed objects
// (k8s-openapi structs or kube::api::Object CRs) are converted through their JSON form, which
// carries apiVersion and kind along with it.
pub fn to_dynamic_object<K: Serialize>(obj: &K) -> anyhow::Result<DynamicObject> {
    let dynobj: DynamicObject = serde_json::from_value(serde_json::to_value(obj)?)?;
    if dynobj.types.is_none() {
        bail!("object is missing apiVersion/kind");
    }
    Ok(dynobj)
}

pub fn split_namespaced_name(name: &str) -> (String, String) {
    match name.split_once('/') {
        Some((namespace, name)) => (namespace.into(), name.into()),
        None => ("".into(), name.into()),
    }
}

impl<T: Resource> KubeResourceExt for T {
    fn namespaced_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}", ns, self.name_any()),
            None => self.name_any().clone(),
        }
    }
}
