mod dry_run;
mod gcp;
mod helm;
mod kubernetes;

use std::sync::Arc;

use async_trait::async_trait;
use kube::api::DynamicObject;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;

pub use self::dry_run::DryRunProvider;
pub use self::gcp::*;
pub use self::helm::*;
pub use self::kubernetes::KubeApplyProvider;
use crate::errors::*;
use crate::k8s::GVK;
use crate::stack::StackError;

err_impl! {ProviderError,
    #[error("helm release failed: {0}")]
    HelmFailed(String),

    #[error("GCP API request failed: {0}")]
    GcpApi(String),

    #[error("no GCP access token: set accessToken in the provider config or export {0}")]
    MissingGcpToken(String),
}

#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait KubeProvider: Send + Sync {
    async fn apply(&self, obj: &DynamicObject) -> EmptyResult;

    // Ok(None) when the object doesn't exist
    async fn get(&self, gvk: &GVK, namespace: &str, name: &str) -> anyhow::Result<Option<DynamicObject>>;
}

#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait HelmProvider: Send + Sync {
    async fn upgrade_install(&self, release: &HelmRelease) -> EmptyResult;
}

#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait GcpProvider: Send + Sync {
    async fn apply(&self, resource: &GcpResource) -> EmptyResult;
}

// The set of backends a stack can dispatch to; kinds only need the ones they use, so an
// unconfigured backend is an error at the point of first use rather than at construction.
#[derive(Clone, Default)]
pub struct Providers {
    kubernetes: Option<Arc<dyn KubeProvider>>,
    helm: Option<Arc<dyn HelmProvider>>,
    gcp: Option<Arc<dyn GcpProvider>>,
}

impl Providers {
    pub fn dry_run() -> Providers {
        let provider = Arc::new(DryRunProvider);
        Providers {
            kubernetes: Some(provider.clone()),
            helm: Some(provider.clone()),
            gcp: Some(provider),
        }
    }

    pub fn with_kubernetes(mut self, provider: impl KubeProvider + 'static) -> Providers {
        self.kubernetes = Some(Arc::new(provider));
        self
    }

    pub fn with_helm(mut self, provider: impl HelmProvider + 'static) -> Providers {
        self.helm = Some(Arc::new(provider));
        self
    }

    pub fn with_gcp(mut self, provider: impl GcpProvider + 'static) -> Providers {
        self.gcp = Some(Arc::new(provider));
        self
    }

    pub(crate) fn kubernetes(&self) -> anyhow::Result<&dyn KubeProvider> {
        self.kubernetes
            .as_deref()
            .ok_or_else(|| StackError::provider_not_configured("kubernetes"))
    }

    pub(crate) fn helm(&self) -> anyhow::Result<&dyn HelmProvider> {
        self.helm.as_deref().ok_or_else(|| StackError::provider_not_configured("helm"))
    }

    pub(crate) fn gcp(&self) -> anyhow::Result<&dyn GcpProvider> {
        self.gcp.as_deref().ok_or_else(|| StackError::provider_not_configured("gcp"))
    }
}

#[cfg(test)]
mod tests;
