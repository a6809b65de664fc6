use std::sync::atomic::{
    AtomicU64,
    Ordering,
};

use kube::Resource;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::*;

use super::*;
use crate::k8s::{
    GVK,
    to_dynamic_object,
};
use crate::providers::{
    GcpResource,
    HelmRelease,
    Providers,
};

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(0);

// StackContext is the single entry point through which a provisioning sequence creates
// resources.  Each call is awaited before the next one is issued, and a resource may only
// reference (as parent or dependency) resources whose creation has already returned.
pub struct StackContext {
    run: u64,
    stack_name: String,
    providers: Providers,
    resources: Vec<RegisteredResource>,
    outputs: StackOutputs,
}

impl StackContext {
    pub fn new(stack_name: &str, providers: Providers) -> StackContext {
        StackContext {
            run: NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed),
            stack_name: stack_name.into(),
            providers,
            resources: vec![],
            outputs: StackOutputs::default(),
        }
    }

    pub fn dry_run(stack_name: &str) -> StackContext {
        StackContext::new(stack_name, Providers::dry_run())
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub async fn register(
        &mut self,
        resource: DesiredResource,
        opts: ResourceOptions,
    ) -> anyhow::Result<ResourceHandle> {
        let urn = resource.urn()?;
        for dep in opts.dependencies() {
            if !self.is_registered(dep) {
                bail!(StackError::unregistered_dependency(dep.urn()));
            }
        }

        if self.resources.iter().any(|r| r.urn == urn) {
            bail!(StackError::duplicate_resource(&urn));
        }

        info!("creating {urn}");
        match &resource {
            DesiredResource::Kubernetes(obj) => self.providers.kubernetes()?.apply(obj).await?,
            DesiredResource::HelmRelease(release) => self.providers.helm()?.upgrade_install(release).await?,
            DesiredResource::Gcp(gcp_resource) => self.providers.gcp()?.apply(gcp_resource).await?,
        }

        let handle = ResourceHandle::new(self.run, self.resources.len(), &urn);
        self.resources.push(RegisteredResource {
            handle: handle.clone(),
            urn,
            parent: opts.parent.as_ref().map(|p| p.urn().to_string()),
            depends_on: opts.depends_on.iter().map(|d| d.urn().to_string()).collect(),
            resource,
        });
        Ok(handle)
    }

    pub async fn kubernetes<K: Serialize>(&mut self, obj: &K, opts: ResourceOptions) -> anyhow::Result<ResourceHandle> {
        let dynobj = to_dynamic_object(obj)?;
        self.register(DesiredResource::Kubernetes(dynobj), opts).await
    }

    // Reads are not registered resources; they let a sequence keep state (generated
    // passwords and the like) stable across runs
    pub async fn read_kubernetes<K>(&self, namespace: &str, name: &str) -> anyhow::Result<Option<K>>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let gvk = GVK::from_resource::<K>();
        let Some(obj) = self.providers.kubernetes()?.get(&gvk, namespace, name).await? else {
            return Ok(None);
        };
        Ok(Some(obj.try_parse::<K>()?))
    }

    pub async fn helm_release(&mut self, release: HelmRelease, opts: ResourceOptions) -> anyhow::Result<ResourceHandle> {
        self.register(DesiredResource::HelmRelease(release), opts).await
    }

    pub async fn gcp(&mut self, resource: GcpResource, opts: ResourceOptions) -> anyhow::Result<ResourceHandle> {
        self.register(DesiredResource::Gcp(resource), opts).await
    }

    pub fn export(&mut self, key: &str, value: impl Into<String>) {
        self.outputs.export(key, value);
    }

    pub fn outputs(&self) -> &StackOutputs {
        &self.outputs
    }

    pub fn planned(&self) -> &[RegisteredResource] {
        &self.resources
    }

    pub fn into_outputs(self) -> StackOutputs {
        self.outputs
    }

    fn is_registered(&self, handle: &ResourceHandle) -> bool {
        handle.run() == self.run && self.resources.get(handle.seq()).is_some_and(|r| r.handle == *handle)
    }
}
