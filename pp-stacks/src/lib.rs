pub mod artifact_registry;
pub mod kafka;
pub mod microservice;
pub mod postgres;
pub mod redis;

use pp_core::errors::*;
use pp_core::manifest::Manifest;
use pp_core::prelude::*;
use tracing::*;

// Everything a run needs besides the manifest itself; the provider configs are only
// consulted by the kinds that talk to that provider
#[derive(Clone, Debug, Default)]
pub struct StackOptions {
    pub kubernetes_provider_config: KubernetesProviderConfig,
    pub gcp_provider_config: GcpProviderConfig,
    pub kubernetes_namespace: Option<String>,
    pub docker_config_json: Option<String>,
}

impl StackOptions {
    pub fn kubernetes_input<T: Clone>(&self, target: &T) -> StackInput<T, KubernetesProviderConfig> {
        StackInput {
            provider_config: self.kubernetes_provider_config.clone(),
            target: target.clone(),
            kubernetes_namespace: self.kubernetes_namespace.clone(),
            docker_config_json: self.docker_config_json.clone(),
        }
    }

    pub fn gcp_input<T: Clone>(&self, target: &T) -> StackInput<T, GcpProviderConfig> {
        StackInput {
            provider_config: self.gcp_provider_config.clone(),
            target: target.clone(),
            kubernetes_namespace: None,
            docker_config_json: None,
        }
    }
}

pub async fn provision(ctx: &mut StackContext, manifest: &Manifest, opts: &StackOptions) -> EmptyResult {
    let kind = manifest.kind();
    let name = &manifest.metadata().name;
    info!("provisioning {kind} {name}");

    let res = match manifest {
        Manifest::GcpArtifactRegistryRepo(target) => artifact_registry::resources(ctx, &opts.gcp_input(target)).await,
        Manifest::KafkaKubernetes(target) => kafka::resources(ctx, &opts.kubernetes_input(target)).await,
        Manifest::MicroserviceKubernetes(target) => microservice::resources(ctx, &opts.kubernetes_input(target)).await,
        Manifest::PostgresKubernetes(target) => postgres::resources(ctx, &opts.kubernetes_input(target)).await,
        Manifest::RedisKubernetes(target) => redis::resources(ctx, &opts.kubernetes_input(target)).await,
    };
    res.with_context(|| format!("failed to provision {kind} {name}"))
}

#[cfg(test)]
mod tests;
