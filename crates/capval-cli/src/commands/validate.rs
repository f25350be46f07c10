//! Validate commands
//!
//! Usage: capval full <MODEL>
//!        capval partial <MODEL> --select <ID>...

use std::path::PathBuf;

use capval_core::model::document::load_model;
use capval_core::pipeline::{run_check, run_validation, ValidationMode};
use capval_core::Collection;
use clap::Args;

use super::{confirm, GlobalArgs};

#[derive(Debug, Args)]
pub struct FullArgs {
    /// Model document (YAML, or JSON with a .json extension)
    pub model: PathBuf,
}

#[derive(Debug, Args)]
pub struct PartialArgs {
    /// Model document (YAML, or JSON with a .json extension)
    pub model: PathBuf,

    /// Element or relationship ids to validate
    #[arg(short, long = "select", num_args = 1.., required = true)]
    pub select: Vec<String>,
}

/// Execute full command
pub fn execute_full(args: FullArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = load_model(&args.model)?;
    run(ValidationMode::Full, &model.full_collection(), global)
}

/// Execute partial command
pub fn execute_partial(
    args: PartialArgs,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = load_model(&args.model)?;
    let collection = model.select(&args.select)?;
    run(ValidationMode::Partial, &collection, global)
}

fn run(
    mode: ValidationMode,
    collection: &Collection<'_>,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = global.load_config()?;

    println!(
        "Collection: {} elements, {} relationships",
        collection.element_count(),
        collection.relationship_count()
    );
    if !global.yes && !confirm(&format!("Run {} validation?", mode.as_str()))? {
        tracing::info!(mode = mode.as_str(), "validation declined");
        println!("Aborted");
        return Ok(());
    }

    let report = run_validation(mode, collection, &config, false, |_| {})?;
    for path in &report.written {
        println!("✓ Wrote {}", path.display());
    }

    let against = match &report.generated.selection {
        Some(selection) => selection.ids(),
        None => "all rules".to_string(),
    };
    println!(
        "Validating {} elements and {} relationships against {}:",
        report.element_count, report.relationship_count, against
    );
    if global.no_check {
        println!(
            "Checker skipped; run `{} check {}` in {}",
            config.checker.display(),
            config.rules_file,
            config.output_dir.display()
        );
        return Ok(());
    }

    let outcome = run_check(&config, |line| println!("{}", line))?;
    println!("Validation completed");

    if outcome.success() {
        println!("✓ Checker passed");
        return Ok(());
    }
    tracing::warn!(exit_code = ?outcome.exit_code, "checker reported failure");
    Err(match outcome.exit_code {
        Some(code) => format!("checker exited with code {}", code),
        None => "checker terminated by signal".to_string(),
    }
    .into())
}
