//! Rendering of the generated specification files
//!
//! - [`population`]: the model population (`model.adl`)
//! - [`assembler`]: the rules file (`rules.adl` or `standalone.adl`)
//! - [`text`]: text literal escaping shared by both

pub mod assembler;
pub mod population;
pub mod text;

pub use assembler::render_rules;
pub use population::render_population;
