//! Term encodings
//!
//! The catalog writes every family once against [`TermEncoding`]. The
//! encoding decides how the two model-dependent facts are spelled: "this
//! element is tagged at level ℓ" and "these two objects are associated".
//!
//! - [`DirectRelations`] targets the population this crate generates, which
//!   has a `level` relation and an `association` relation.
//! - [`PropertyTriples`] targets a foreign ArchiMate export, where level
//!   tags are `propOf`/`key`/`value` property triples and relationships are
//!   reified with `source`/`type`/`target`.

use crate::algebra::{compose, union, Term};
use crate::model::{Level, LEVEL_PROPERTY};

pub(crate) const ELEMENT: &str = "Element";
pub(crate) const BUSINESS_OBJECT: &str = "BusinessObject";

/// Spelling of the model-dependent parts of the catalog
pub trait TermEncoding {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Identity on elements tagged at one of `levels`
    ///
    /// `None` drops the value constraint: the term then relates every
    /// element carrying any level tag at all.
    fn level_predicate(&self, levels: Option<&[Level]>) -> Term;

    /// The business-object association relation
    fn association(&self) -> Term;

    /// Relation declarations this encoding needs beyond the common header
    fn declarations(&self) -> Vec<String>;
}

/// `"0"` for one level, `("0" \/ "1")` for several
fn level_values(levels: Option<&[Level]>) -> Option<Term> {
    let levels = levels?;
    if levels.is_empty() {
        return None;
    }
    Some(union(levels.iter().map(|l| Term::literal(l.as_str()))))
}

/// Levels and associations as plain relations of the generated population
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRelations;

impl DirectRelations {
    fn level() -> Term {
        Term::relation("level", format!("{}*Level", ELEMENT))
    }
}

impl TermEncoding for DirectRelations {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn level_predicate(&self, levels: Option<&[Level]>) -> Term {
        let mut parts = vec![Self::level()];
        parts.extend(level_values(levels));
        parts.push(Self::level().converse());
        compose(parts)
    }

    fn association(&self) -> Term {
        Term::relation("association", BUSINESS_OBJECT)
    }

    fn declarations(&self) -> Vec<String> {
        vec![
            format!("RELATION {}", self.association()),
            format!("RELATION {}", Self::level()),
        ]
    }
}

/// Levels as property triples and associations as reified relationships
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyTriples;

impl PropertyTriples {
    fn prop_of() -> Term {
        Term::relation("propOf", "Property*ArchiObject")
    }

    fn key() -> Term {
        Term::relation("key", "Property*Text")
    }

    fn value() -> Term {
        Term::relation("value", "Property*Text")
    }

    fn source() -> Term {
        Term::relation("source", format!("Relationship*{}", BUSINESS_OBJECT))
    }

    fn target() -> Term {
        Term::relation("target", format!("Relationship*{}", BUSINESS_OBJECT))
    }

    fn relationship_type() -> Term {
        Term::relation("type", "Relationship*Text")
    }

    /// Identity on properties whose key is `key`
    fn keyed(key: &str) -> Term {
        Term::identity("Property").and(compose([
            Self::key(),
            Term::literal(key),
            Self::key().converse(),
        ]))
    }
}

impl TermEncoding for PropertyTriples {
    fn name(&self) -> &'static str {
        "property-triples"
    }

    fn level_predicate(&self, levels: Option<&[Level]>) -> Term {
        let mut parts = vec![
            Self::prop_of().converse(),
            Self::keyed(LEVEL_PROPERTY),
            Self::value(),
        ];
        parts.extend(level_values(levels));
        parts.push(Self::value().converse());
        parts.push(Self::prop_of());
        compose(parts)
    }

    fn association(&self) -> Term {
        let is_association = compose([
            Self::relationship_type(),
            Term::literal("association"),
            Self::relationship_type().converse(),
        ])
        .and(Term::identity("Relationship"));

        compose([Self::source().converse(), is_association, Self::target()])
    }

    fn declarations(&self) -> Vec<String> {
        vec![
            format!("RELATION {}", Self::source()),
            format!("RELATION {}", Self::target()),
            format!("RELATION {}", Self::relationship_type()),
            format!("RELATION {} [UNI]", Self::prop_of()),
            format!("RELATION {} [UNI]", Self::key()),
            format!("RELATION {} [UNI]", Self::value()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_level_predicate() {
        let enc = DirectRelations;
        assert_eq!(
            enc.level_predicate(None).to_string(),
            "level[Element*Level];level[Element*Level]~"
        );
        assert_eq!(
            enc.level_predicate(Some(&[Level::ALL[2]][..])).to_string(),
            "level[Element*Level];\"2\";level[Element*Level]~"
        );
        assert_eq!(
            enc.level_predicate(Some(&Level::ALL[..2])).to_string(),
            "level[Element*Level];(\"0\" \\/ \"1\");level[Element*Level]~"
        );
    }

    #[test]
    fn test_property_level_predicate() {
        let enc = PropertyTriples;
        assert_eq!(
            enc.level_predicate(Some(&[Level::ALL[0]][..])).to_string(),
            "propOf[Property*ArchiObject]~;\
             (I[Property] /\\ key[Property*Text];\"Level\";key[Property*Text]~);\
             value[Property*Text];\"0\";value[Property*Text]~;\
             propOf[Property*ArchiObject]"
        );
        assert!(!enc.level_predicate(None).to_string().contains("\"0\""));
    }

    #[test]
    fn test_association_spellings() {
        assert_eq!(
            DirectRelations.association().to_string(),
            "association[BusinessObject]"
        );
        assert_eq!(
            PropertyTriples.association().to_string(),
            "source[Relationship*BusinessObject]~;\
             (type[Relationship*Text];\"association\";type[Relationship*Text]~ /\\ I[Relationship]);\
             target[Relationship*BusinessObject]"
        );
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            DirectRelations.declarations(),
            vec![
                "RELATION association[BusinessObject]",
                "RELATION level[Element*Level]"
            ]
        );
        assert!(PropertyTriples
            .declarations()
            .contains(&"RELATION propOf[Property*ArchiObject] [UNI]".to_string()));
    }
}
