//! Validation runs
//!
//! A run regenerates everything from the current collection:
//!
//! 1. render the population
//! 2. select rules (partial mode only; full mode checks every universal rule)
//! 3. assemble the rules file
//! 4. write both files to the output directory
//! 5. run the checker on the rules file, unless disabled
//!
//! A standalone run only writes the property-triple rules file, for checking
//! a foreign export with the checker by hand.
//!
//! Each step is logged with `log_op_start!` / `log_op_end!`; a failing step
//! is logged with `log_op_error!` and ends the run.

use std::path::PathBuf;
use std::time::Instant;

use crate::catalog::{DirectRelations, PropertyTriples};
use crate::checker::{run_checker, CheckerOutcome};
use crate::config::CapValConfig;
use crate::errors::Result;
use crate::model::Collection;
use crate::output::{write_artifact, Artifact};
use crate::render::{render_population, render_rules};
use crate::selection::{select_rules, SelectedRuleSet};
use crate::{log_op_end, log_op_error, log_op_start};

/// Which rules a validation run checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every universal rule
    Full,
    /// Only the rules selected for the collection
    Partial,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMode::Full => "full",
            ValidationMode::Partial => "partial",
        }
    }
}

/// Generated files of a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub population: Artifact,
    pub rules: Artifact,
    /// `None` in full mode
    pub selection: Option<SelectedRuleSet>,
}

/// Outcome of a validation run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: ValidationMode,
    pub element_count: usize,
    pub relationship_count: usize,
    pub generated: Generated,
    pub written: Vec<PathBuf>,
    /// `None` when checking was disabled
    pub checker: Option<CheckerOutcome>,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Generate the population and rules for a collection without writing them
///
/// # Errors
///
/// Returns `Internal` if rule assembly fails.
pub fn generate(
    mode: ValidationMode,
    collection: &Collection<'_>,
    config: &CapValConfig,
) -> Result<Generated> {
    let start = Instant::now();
    log_op_start!(
        "generate_population",
        element_count = collection.element_count(),
        relationship_count = collection.relationship_count()
    );
    let population = Artifact::new(config.model_file.clone(), render_population(collection));
    log_op_end!(
        "generate_population",
        duration_ms = elapsed_ms(start),
        digest = %population.digest
    );

    let selection = match mode {
        ValidationMode::Full => None,
        ValidationMode::Partial => {
            let start = Instant::now();
            log_op_start!("select_rules");
            let selected = select_rules(collection);
            log_op_end!(
                "select_rules",
                duration_ms = elapsed_ms(start),
                rule_count = selected.len(),
                rules = %selected.ids()
            );
            Some(selected)
        }
    };

    let start = Instant::now();
    log_op_start!("assemble_rules", mode = mode.as_str());
    let rules = render_rules(&DirectRelations, &config.model_file, selection.as_ref())
        .map(|content| Artifact::new(config.rules_file.clone(), content))
        .map_err(|e| {
            log_op_error!("assemble_rules", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;
    log_op_end!(
        "assemble_rules",
        duration_ms = elapsed_ms(start),
        digest = %rules.digest
    );

    Ok(Generated {
        population,
        rules,
        selection,
    })
}

fn write_logged(config: &CapValConfig, artifact: &Artifact) -> Result<PathBuf> {
    let start = Instant::now();
    log_op_start!("write_artifact", file = %artifact.file_name);
    let path = write_artifact(&config.output_dir, artifact).map_err(|e| {
        log_op_error!("write_artifact", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;
    log_op_end!(
        "write_artifact",
        duration_ms = elapsed_ms(start),
        path = %path.display(),
        digest = %artifact.digest
    );
    Ok(path)
}

/// Validate a collection: generate, write and (optionally) check
///
/// Checker stderr lines are passed to `on_line` as they arrive.
///
/// # Errors
///
/// Returns `WriteFailed` if an output file cannot be written (no checker run
/// follows) and `CheckerLaunch` if the checker cannot be started.
pub fn run_validation(
    mode: ValidationMode,
    collection: &Collection<'_>,
    config: &CapValConfig,
    check: bool,
    on_line: impl FnMut(&str),
) -> Result<RunReport> {
    let start = Instant::now();
    log_op_start!("validate", mode = mode.as_str());

    let result = validate_impl(mode, collection, config, check, on_line);
    match &result {
        Ok(report) => {
            log_op_end!(
                "validate",
                duration_ms = elapsed_ms(start),
                exit_code = ?report.checker.as_ref().and_then(|c| c.exit_code)
            );
        }
        Err(e) => log_op_error!("validate", e.clone(), duration_ms = elapsed_ms(start)),
    }
    result
}

fn validate_impl(
    mode: ValidationMode,
    collection: &Collection<'_>,
    config: &CapValConfig,
    check: bool,
    on_line: impl FnMut(&str),
) -> Result<RunReport> {
    let generated = generate(mode, collection, config)?;

    let written = vec![
        write_logged(config, &generated.population)?,
        write_logged(config, &generated.rules)?,
    ];

    let checker = if check {
        Some(run_check(config, on_line)?)
    } else {
        None
    };

    Ok(RunReport {
        mode,
        element_count: collection.element_count(),
        relationship_count: collection.relationship_count(),
        generated,
        written,
        checker,
    })
}

/// Run the checker on the rules file already written to the output directory
///
/// # Errors
///
/// Returns `CheckerLaunch` if the checker cannot be started.
pub fn run_check(config: &CapValConfig, on_line: impl FnMut(&str)) -> Result<CheckerOutcome> {
    let start = Instant::now();
    log_op_start!("run_checker", program = %config.checker.display());
    let outcome = run_checker(
        &config.checker,
        &config.rules_file,
        &config.output_dir,
        on_line,
    )
    .map_err(|e| {
        log_op_error!("run_checker", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;
    log_op_end!(
        "run_checker",
        duration_ms = elapsed_ms(start),
        exit_code = ?outcome.exit_code
    );
    Ok(outcome)
}

/// Write the standalone rules file for checking a foreign export
///
/// # Errors
///
/// Returns `WriteFailed` if the file cannot be written.
pub fn run_standalone(config: &CapValConfig) -> Result<PathBuf> {
    let start = Instant::now();
    log_op_start!("standalone");

    let result = render_rules(&PropertyTriples, &config.foreign_include, None)
        .map(|content| Artifact::new(config.standalone_file.clone(), content))
        .and_then(|artifact| write_logged(config, &artifact));

    match &result {
        Ok(path) => {
            log_op_end!(
                "standalone",
                duration_ms = elapsed_ms(start),
                path = %path.display()
            );
        }
        Err(e) => log_op_error!("standalone", e.clone(), duration_ms = elapsed_ms(start)),
    }
    result
}
