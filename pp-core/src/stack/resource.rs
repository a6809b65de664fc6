use std::fmt;

use kube::api::DynamicObject;
use serde::Serialize;

use super::*;
use crate::k8s::GVK;
use crate::providers::{
    GcpResource,
    HelmRelease,
};

// A handle is proof that a resource was registered (and therefore created) earlier in the
// same run; the run id keeps handles from one StackContext from satisfying another.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResourceHandle {
    run: u64,
    seq: usize,
    urn: String,
}

impl ResourceHandle {
    pub(super) fn new(run: u64, seq: usize, urn: &str) -> ResourceHandle {
        ResourceHandle { run, seq, urn: urn.into() }
    }

    pub fn urn(&self) -> &str {
        &self.urn
    }

    pub(super) fn run(&self) -> u64 {
        self.run
    }

    pub(super) fn seq(&self) -> usize {
        self.seq
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.urn)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResourceOptions {
    pub parent: Option<ResourceHandle>,
    pub depends_on: Vec<ResourceHandle>,
}

impl ResourceOptions {
    pub fn parent(parent: &ResourceHandle) -> ResourceOptions {
        ResourceOptions { parent: Some(parent.clone()), depends_on: vec![] }
    }

    pub fn depends_on(mut self, dep: &ResourceHandle) -> ResourceOptions {
        self.depends_on.push(dep.clone());
        self
    }

    pub fn depends_on_all<'a>(mut self, deps: impl IntoIterator<Item = &'a ResourceHandle>) -> ResourceOptions {
        self.depends_on.extend(deps.into_iter().cloned());
        self
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &ResourceHandle> {
        self.parent.iter().chain(self.depends_on.iter())
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DesiredResource {
    Kubernetes(DynamicObject),
    HelmRelease(HelmRelease),
    Gcp(GcpResource),
}

impl DesiredResource {
    pub fn urn(&self) -> anyhow::Result<String> {
        match self {
            DesiredResource::Kubernetes(obj) => {
                let gvk = GVK::from_dynamic_obj(obj)?;
                let Some(name) = obj.metadata.name.as_ref() else {
                    bail!(StackError::missing_object_name(&gvk.kind));
                };
                Ok(match &obj.metadata.namespace {
                    Some(ns) => format!("kubernetes:{gvk}::{ns}/{name}"),
                    None => format!("kubernetes:{gvk}::{name}"),
                })
            },
            DesiredResource::HelmRelease(release) => Ok(release.urn()),
            DesiredResource::Gcp(resource) => Ok(resource.urn()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisteredResource {
    #[serde(skip)]
    pub handle: ResourceHandle,
    pub urn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    pub resource: DesiredResource,
}
