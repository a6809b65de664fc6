use async_trait::async_trait;
use kube::api::{
    DynamicObject,
    Patch,
    PatchParams,
};
use kube::config::{
    KubeConfigOptions,
    Kubeconfig,
};
use tracing::*;

use super::*;
use crate::k8s::GVK;
use crate::prelude::*;
use crate::stack::StackError;

pub struct KubeApplyProvider {
    client: kube::Client,
}

impl KubeApplyProvider {
    pub fn new(client: kube::Client) -> KubeApplyProvider {
        KubeApplyProvider { client }
    }

    pub async fn from_config(config: &KubernetesProviderConfig) -> anyhow::Result<KubeApplyProvider> {
        let client = match &config.kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path).with_context(|| format!("failed to read {path}"))?;
                let options = KubeConfigOptions {
                    context: config.context.clone(),
                    ..Default::default()
                };
                kube::Client::try_from(kube::Config::from_custom_kubeconfig(kubeconfig, &options).await?)?
            },
            None => kube::Client::try_default().await?,
        };
        Ok(KubeApplyProvider::new(client))
    }
}

#[async_trait]
impl KubeProvider for KubeApplyProvider {
    async fn apply(&self, obj: &DynamicObject) -> EmptyResult {
        let gvk = GVK::from_dynamic_obj(obj)?;
        let Some(name) = obj.metadata.name.as_deref() else {
            bail!(StackError::missing_object_name(&gvk.kind));
        };

        let ar = gvk.api_resource();
        let api = match obj.metadata.namespace.as_deref() {
            Some(ns) => kube::Api::<DynamicObject>::namespaced_with(self.client.clone(), ns, &ar),
            None => kube::Api::<DynamicObject>::all_with(self.client.clone(), &ar),
        };

        let params = PatchParams::apply(FIELD_MANAGER).force();
        let applied = api.patch(name, &params, &Patch::Apply(obj)).await?;
        debug!(
            "applied {} {} (resourceVersion {})",
            gvk,
            applied.namespaced_name(),
            applied.resource_version().unwrap_or_default()
        );
        Ok(())
    }

    async fn get(&self, gvk: &GVK, namespace: &str, name: &str) -> anyhow::Result<Option<DynamicObject>> {
        let api = kube::Api::<DynamicObject>::namespaced_with(self.client.clone(), namespace, &gvk.api_resource());
        Ok(api.get_opt(name).await?)
    }
}
