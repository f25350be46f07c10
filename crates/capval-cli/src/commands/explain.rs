//! Explain command
//!
//! Usage: capval explain <MODEL> [--select <ID>...]
//!
//! Prints the levels each relationship family touches and the rule instances
//! a partial run would check. Nothing is written.

use std::path::PathBuf;

use capval_core::model::document::load_model;
use capval_core::selection::{select_from_profile, LevelProfile};
use clap::Args;

use super::GlobalArgs;

#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// Model document (YAML, or JSON with a .json extension)
    pub model: PathBuf,

    /// Restrict to these element or relationship ids
    #[arg(short, long = "select", num_args = 1..)]
    pub select: Vec<String>,
}

/// Execute explain command
pub fn execute(args: ExplainArgs, _global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = load_model(&args.model)?;
    let collection = if args.select.is_empty() {
        model.full_collection()
    } else {
        model.select(&args.select)?
    };

    let profile = LevelProfile::compute(&collection);
    let selection = select_from_profile(&profile);

    println!(
        "Collection: {} elements, {} relationships",
        collection.element_count(),
        collection.relationship_count()
    );
    println!();
    println!("{}", profile);
    println!();
    for instance in &selection {
        println!("{}", instance);
    }
    Ok(())
}
