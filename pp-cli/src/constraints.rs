use clap::{
    Subcommand,
    value_parser,
};
use pp_core::prelude::*;
use pp_core::validation::{
    CONSTRAINTS,
    PrintFormat,
};

#[derive(Subcommand)]
pub enum ConstraintsSubcommand {
    #[command(about = "explain a constraint")]
    Explain(ExplainArgs),

    #[command(about = "print all constraints")]
    List(ListArgs),
}

#[derive(clap::Args)]
pub struct ExplainArgs {
    #[arg(long_help = "constraint id to explain, e.g. spec.kafka_topics.name")]
    pub id: String,
}

#[derive(clap::Args)]
pub struct ListArgs {
    #[arg(
        short,
        long,
        long_help = "format to display the constraints",
        default_value = "list",
        value_parser = value_parser!(PrintFormat),
    )]
    pub format: PrintFormat,
}

pub fn cmd(subcommand: &ConstraintsSubcommand) -> EmptyResult {
    let out = match subcommand {
        ConstraintsSubcommand::Explain(args) => CONSTRAINTS.explain(&args.id)?,
        ConstraintsSubcommand::List(args) => CONSTRAINTS.render(&args.format)?,
    };
    println!("{}", out.trim_end());
    Ok(())
}
