use pp_core::config::load_provider_config;
use pp_core::errors::*;
use pp_core::manifest::Manifest;
use pp_core::prelude::*;
use pp_core::providers::{
    GcpRestProvider,
    HelmCliProvider,
    KubeApplyProvider,
    Providers,
};
use pp_stacks::{
    StackOptions,
    provision,
};
use serde_json::json;
use tracing::*;

use crate::validate::ManifestArgs;

const HELM_BINARY: &str = "helm";

#[derive(clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    #[arg(long, long_help = "namespace to provision kubernetes resources into, overriding the default")]
    pub kubernetes_namespace: Option<String>,
}

#[derive(clap::Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    #[arg(long, long_help = "YAML file with the kubernetes provider config (kubeconfig, context)")]
    pub kubernetes_provider_config: Option<String>,

    #[arg(long, long_help = "YAML file with the GCP provider config (access token)")]
    pub gcp_provider_config: Option<String>,
}

fn stack_name(manifest: &Manifest) -> String {
    format!("{}-{}", manifest.kind().snake_name(), manifest.metadata().name)
}

// One YAML document per resource, in creation order, followed by the outputs
pub fn render_plan(ctx: &StackContext) -> anyhow::Result<String> {
    let mut out = String::new();
    for resource in ctx.planned() {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(resource)?);
    }
    out.push_str("---\n");
    out.push_str(&serde_yaml::to_string(&json!({ "outputs": ctx.outputs() }))?);
    Ok(out)
}

pub async fn plan(manifest: &Manifest, opts: &StackOptions) -> anyhow::Result<StackContext> {
    let mut ctx = StackContext::dry_run(&stack_name(manifest));
    provision(&mut ctx, manifest, opts).await?;
    Ok(ctx)
}

async fn providers_for(kind: CloudResourceKind, opts: &StackOptions) -> anyhow::Result<Providers> {
    Ok(match kind.family() {
        ProviderFamily::Kubernetes => {
            let config = &opts.kubernetes_provider_config;
            let kube = KubeApplyProvider::from_config(config)
                .await
                .context("failed to configure kubernetes provider")?;
            let helm = HelmCliProvider::new(HELM_BINARY).with_kubeconfig(config.kubeconfig.clone(), config.context.clone());
            Providers::default().with_kubernetes(kube).with_helm(helm)
        },
        ProviderFamily::Gcp => {
            let gcp = GcpRestProvider::from_config(&opts.gcp_provider_config).context("failed to configure gcp provider")?;
            Providers::default().with_gcp(gcp)
        },
    })
}

#[instrument(skip_all, fields(manifest = %args.manifest.manifest))]
pub async fn plan_cmd(args: &PlanArgs) -> EmptyResult {
    let manifest = args.manifest.load_valid().await?;
    let opts = StackOptions {
        kubernetes_namespace: args.kubernetes_namespace.clone(),
        ..Default::default()
    };
    let ctx = plan(&manifest, &opts).await?;
    print!("{}", render_plan(&ctx)?);
    Ok(())
}

#[instrument(skip_all, fields(manifest = %args.plan.manifest.manifest))]
pub async fn apply_cmd(args: &ApplyArgs) -> EmptyResult {
    let manifest = args.plan.manifest.load_valid().await?;
    let opts = StackOptions {
        kubernetes_provider_config: load_provider_config(args.kubernetes_provider_config.as_deref())?,
        gcp_provider_config: load_provider_config(args.gcp_provider_config.as_deref())?,
        kubernetes_namespace: args.plan.kubernetes_namespace.clone(),
        docker_config_json: None,
    };

    let providers = providers_for(manifest.kind(), &opts).await?;
    let mut ctx = StackContext::new(&stack_name(&manifest), providers);
    provision(&mut ctx, &manifest, &opts).await?;
    info!("created {} resources", ctx.planned().len());

    print!("{}", serde_yaml::to_string(&ctx.into_outputs())?);
    Ok(())
}
