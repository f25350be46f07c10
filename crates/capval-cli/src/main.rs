//! CapVal CLI
//!
//! Command-line interface for capability-model validation

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "capval")]
#[command(about = "CapVal - Capability model well-formedness checks", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate the whole model against every rule
    Full(commands::validate::FullArgs),
    /// Validate selected elements against the rules that apply to them
    Partial(commands::validate::PartialArgs),
    /// Write the rules file for a foreign model export
    Standalone,
    /// Show the level profile and the rules a selection would check
    Explain(commands::explain::ExplainArgs),
}

fn main() {
    let cli = Cli::parse();
    capval_core::logging_facility::init(cli.global.log_format.profile());

    let result = match cli.command {
        Commands::Full(args) => commands::validate::execute_full(args, &cli.global),
        Commands::Partial(args) => commands::validate::execute_partial(args, &cli.global),
        Commands::Standalone => commands::standalone::execute(&cli.global),
        Commands::Explain(args) => commands::explain::execute(args, &cli.global),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
