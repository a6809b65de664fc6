use pp_core::manifest::{
    Manifest,
    load_manifest,
};
use pp_core::prelude::*;
use tracing::*;

#[derive(clap::Args)]
pub struct ManifestArgs {
    #[arg(short = 'f', long, long_help = "path or http(s) URL of the manifest")]
    pub manifest: String,

    #[arg(
        long = "set",
        value_name = "PATH=VALUE",
        long_help = "override a manifest field before validation, e.g. spec.container.replicas=3; quote keys that \
                     contain dots: metadata.labels.\"kubernetes.project-planton.org/namespace\"=team-a"
    )]
    pub overrides: Vec<String>,
}

impl ManifestArgs {
    // Violations come back as a ValidationErrors so that callers can downcast them
    pub async fn load_valid(&self) -> anyhow::Result<Manifest> {
        let manifest = load_manifest(&self.manifest, &self.overrides).await?;
        manifest.validate()?;
        debug!("{} {} is valid", manifest.kind(), manifest.metadata().name);
        Ok(manifest)
    }
}

#[derive(clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

#[instrument(skip_all, fields(manifest = %args.manifest.manifest))]
pub async fn cmd(args: &Args) -> EmptyResult {
    args.manifest.load_valid().await?;
    println!("manifest is valid");
    Ok(())
}
