//! Standalone command
//!
//! Usage: capval standalone [--output-dir <DIR>]

use capval_core::pipeline::run_standalone;

use super::GlobalArgs;

/// Execute standalone command
pub fn execute(global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = global.load_config()?;
    let path = run_standalone(&config)?;

    println!("✓ Wrote {}", path.display());
    println!();
    println!(
        "Update the INCLUDE statement (currently \"{}\") to point to your ArchiMate export.",
        config.foreign_include
    );
    println!(
        "To validate your model, run: {} check {}",
        config.checker.display(),
        config.standalone_file
    );
    Ok(())
}
