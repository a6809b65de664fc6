use async_trait::async_trait;
use kube::api::DynamicObject;
use tracing::*;

use super::*;
use crate::k8s::{
    GVK,
    KubeResourceExt,
};

// Records nothing and talks to nothing; the StackContext keeps the ordered list of what would
// have been created, which is all `plan` needs.
pub struct DryRunProvider;

#[async_trait]
impl KubeProvider for DryRunProvider {
    async fn apply(&self, obj: &DynamicObject) -> EmptyResult {
        debug!("dry-run: skipping apply of {}", obj.namespaced_name());
        Ok(())
    }

    // A dry run never sees the cluster, so everything looks new
    async fn get(&self, gvk: &GVK, namespace: &str, name: &str) -> anyhow::Result<Option<DynamicObject>> {
        debug!("dry-run: not reading {gvk} {namespace}/{name}");
        Ok(None)
    }
}

#[async_trait]
impl HelmProvider for DryRunProvider {
    async fn upgrade_install(&self, release: &HelmRelease) -> EmptyResult {
        debug!("dry-run: skipping helm release {}/{}", release.namespace, release.name);
        Ok(())
    }
}

#[async_trait]
impl GcpProvider for DryRunProvider {
    async fn apply(&self, resource: &GcpResource) -> EmptyResult {
        debug!("dry-run: skipping {}", resource.urn());
        Ok(())
    }
}
