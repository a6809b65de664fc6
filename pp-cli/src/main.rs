mod completions;
mod constraints;
mod kinds;
mod plan;
mod validate;

use clap::{
    CommandFactory,
    Parser,
    Subcommand,
    crate_version,
};
use pp_core::logging;
use pp_core::prelude::*;

#[derive(Parser)]
#[command(
    name = "project-planton",
    about = "validate, plan and provision Project Planton cloud resources",
    version,
    propagate_version = true
)]
struct PlantonCommandRoot {
    #[command(subcommand)]
    subcommand: PlantonSubcommand,

    #[arg(short, long, default_value = "warn")]
    verbosity: String,
}

#[derive(Subcommand)]
enum PlantonSubcommand {
    #[command(about = "provision the resources described by a manifest")]
    Apply(plan::ApplyArgs),

    #[command(about = "generate shell completions for project-planton")]
    Completions(completions::Args),

    #[command(subcommand, about = "inspect the validation constraint catalog")]
    Constraints(constraints::ConstraintsSubcommand),

    #[command(about = "list the supported cloud resource kinds")]
    Kinds(kinds::Args),

    #[command(about = "show the resources a manifest would create, without creating them")]
    Plan(plan::PlanArgs),

    #[command(about = "check a manifest against its kind's constraints", visible_alias = "val")]
    Validate(validate::Args),

    #[command(about = "project-planton version")]
    Version,
}

async fn run(args: &PlantonCommandRoot) -> EmptyResult {
    match &args.subcommand {
        PlantonSubcommand::Apply(args) => plan::apply_cmd(args).await,
        PlantonSubcommand::Completions(args) => completions::cmd(args, PlantonCommandRoot::command()),
        PlantonSubcommand::Constraints(subcommand) => constraints::cmd(subcommand),
        PlantonSubcommand::Kinds(args) => kinds::cmd(args),
        PlantonSubcommand::Plan(args) => plan::plan_cmd(args).await,
        PlantonSubcommand::Validate(args) => validate::cmd(args).await,
        PlantonSubcommand::Version => {
            println!("project-planton {}", crate_version!());
            Ok(())
        },
    }
}

#[tokio::main]
async fn main() {
    let args = PlantonCommandRoot::parse();
    logging::setup_for_cli(&args.verbosity);

    if let Err(err) = run(&args).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests;
