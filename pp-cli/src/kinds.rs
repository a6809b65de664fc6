use pp_core::prelude::*;
use schemars::{
    Schema,
    schema_for,
};

#[derive(clap::Args)]
pub struct Args {
    #[arg(long, long_help = "print the JSON schema of this kind instead of the list of kinds")]
    pub schema: Option<CloudResourceKind>,
}

pub fn schema_for_kind(kind: CloudResourceKind) -> Schema {
    match kind {
        CloudResourceKind::GcpArtifactRegistryRepo => schema_for!(GcpArtifactRegistryRepo),
        CloudResourceKind::KafkaKubernetes => schema_for!(KafkaKubernetes),
        CloudResourceKind::MicroserviceKubernetes => schema_for!(MicroserviceKubernetes),
        CloudResourceKind::PostgresKubernetes => schema_for!(PostgresKubernetes),
        CloudResourceKind::RedisKubernetes => schema_for!(RedisKubernetes),
    }
}

pub fn render_kinds() -> String {
    CloudResourceKind::ALL
        .iter()
        .map(|k| format!("{:<28}{}\n", k.as_str(), k.api_version()))
        .collect()
}

pub fn cmd(args: &Args) -> EmptyResult {
    match args.schema {
        Some(kind) => println!("{}", serde_json::to_string_pretty(&schema_for_kind(kind))?),
        None => print!("{}", render_kinds()),
    }
    Ok(())
}
