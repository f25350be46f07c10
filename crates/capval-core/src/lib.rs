//! CapVal Core - capability-model well-formedness compiler
//!
//! This crate compiles an enterprise-architecture model into a relation-algebra
//! specification for an external checker:
//! - Model loading and projection into collections (full or partial)
//! - Population generation (`model.adl`)
//! - A catalog of fourteen parametrized rule families in two term encodings
//! - Rule selection inferred from the levels each relationship family touches
//! - Rules file assembly (`rules.adl`, `standalone.adl`)
//! - Validation runs: write the files, invoke the checker, relay its output

pub mod algebra;
pub mod catalog;
pub mod checker;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod selection;

pub use capval_core_types::schema;

// Re-export commonly used types
pub use catalog::{Catalog, Family, RelationKind, RuleInstance, TermEncoding};
pub use config::CapValConfig;
pub use errors::{CapValError, ExError, ExErrorKind, Result};
pub use model::{Collection, Element, ElementType, Level, Model, Relationship, RelationshipType};
pub use pipeline::{run_standalone, run_validation, RunReport, ValidationMode};
pub use selection::{select_rules, LevelProfile, SelectedRuleSet};
