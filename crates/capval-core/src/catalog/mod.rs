//! Rule catalog
//!
//! The catalog maps every [`RuleInstance`] to its rule body: the universal
//! form of all fourteen families, plus the per-level variants of the
//! level-scoped families C6 through C13. It is a pure function of the
//! [`TermEncoding`] and is rebuilt for every run.
//!
//! ## Rule text
//!
//! ```text
//! RULE C6_function_must_access_object:
//!     I[BusinessFunction] |- access[BusinessFunction*BusinessObject];access[BusinessFunction*BusinessObject]~
//!     MEANING {+ Each business function must access at least one business object. +}
//!     VIOLATION (TXT "(", SRC name[ArchiObject*Text], TXT ", ", TGT name[ArchiObject*Text], TXT ")")
//! ```

pub mod encoding;
mod families;
pub mod instance;

use std::collections::BTreeMap;
use std::fmt;

use crate::algebra::Inclusion;
use crate::model::Level;

pub use encoding::{DirectRelations, PropertyTriples, TermEncoding};
pub use instance::{Family, RelationKind, RuleInstance};

/// Violation template shared by every rule
pub const VIOLATION: &str =
    "VIOLATION (TXT \"(\", SRC name[ArchiObject*Text], TXT \", \", TGT name[ArchiObject*Text], TXT \")\")";

/// One named rule with its meaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub label: String,
    pub inclusion: Inclusion,
    pub meaning: String,
}

impl RuleDefinition {
    pub fn new(label: impl Into<String>, inclusion: Inclusion, meaning: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            inclusion,
            meaning: meaning.into(),
        }
    }
}

impl fmt::Display for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RULE {}:", self.label)?;
        writeln!(f, "    {}", self.inclusion)?;
        writeln!(f, "    MEANING {{+ {} +}}", self.meaning)?;
        writeln!(f, "    {}", VIOLATION)
    }
}

/// All rules checked for one instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBody {
    pub instance: RuleInstance,
    pub rules: Vec<RuleDefinition>,
}

impl fmt::Display for RuleBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// Every rule body, keyed by instance
#[derive(Debug, Clone)]
pub struct Catalog {
    encoding: &'static str,
    bodies: BTreeMap<RuleInstance, RuleBody>,
}

impl Catalog {
    /// Build the catalog for an encoding
    pub fn build(encoding: &dyn TermEncoding) -> Self {
        let mut bodies = BTreeMap::new();

        for (family, rules) in families::universal_bodies(encoding) {
            if family.is_level_scoped() {
                for level in Level::ALL {
                    let instance = RuleInstance::at_level(family, level);
                    bodies.insert(
                        instance,
                        RuleBody {
                            instance,
                            rules: families::level_variant(encoding, &rules, level),
                        },
                    );
                }
            }

            let instance = RuleInstance::universal(family);
            bodies.insert(instance, RuleBody { instance, rules });
        }

        Self {
            encoding: encoding.name(),
            bodies,
        }
    }

    /// Name of the encoding the catalog was built with
    pub fn encoding(&self) -> &'static str {
        self.encoding
    }

    /// Get the body of one instance
    pub fn get(&self, instance: &RuleInstance) -> Option<&RuleBody> {
        self.bodies.get(instance)
    }

    /// Universal bodies of every family, in catalog order
    pub fn universal(&self) -> impl Iterator<Item = &RuleBody> {
        self.bodies
            .values()
            .filter(|body| body.instance.level.is_none())
    }

    /// Total number of bodies, level variants included
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
