//! Relation-algebra terms
//!
//! Terms are built from typed relations, identities and text literals with
//! the usual operators and printed in the checker's concrete syntax. The
//! printer inserts parentheses only where operator precedence needs them.
//!
//! ## Precedence (tightest first)
//!
//! 1. postfix `~`, `+`, `*`
//! 2. prefix complement `-x`
//! 3. composition `;`
//! 4. difference `-`
//! 5. union `\/` and intersection `/\` (never mixed without parentheses)
//!
//! Union and intersection operands that are differences are parenthesized
//! too, which keeps the rendered rules readable.

use std::fmt;

use crate::render::text::quote;

/// A relation-algebra term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// `I[T]`
    Identity(String),
    /// `V[T]`
    Universal(String),
    /// `name[signature]`, e.g. `access[BusinessFunction*BusinessObject]`
    Relation { name: String, signature: String },
    /// Quoted text atom, e.g. `"0"`
    Literal(String),
    Converse(Box<Term>),
    Complement(Box<Term>),
    /// Transitive closure `+`
    Closure(Box<Term>),
    /// Reflexive-transitive closure `*`
    ReflexiveClosure(Box<Term>),
    Compose(Vec<Term>),
    Union(Vec<Term>),
    Intersect(Vec<Term>),
    Difference(Box<Term>, Box<Term>),
}

impl Term {
    pub fn identity(concept: impl Into<String>) -> Self {
        Term::Identity(concept.into())
    }

    pub fn universal(concept: impl Into<String>) -> Self {
        Term::Universal(concept.into())
    }

    pub fn relation(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Term::Relation {
            name: name.into(),
            signature: signature.into(),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Term::Literal(text.into())
    }

    pub fn converse(self) -> Self {
        Term::Converse(Box::new(self))
    }

    pub fn complement(self) -> Self {
        Term::Complement(Box::new(self))
    }

    pub fn plus(self) -> Self {
        Term::Closure(Box::new(self))
    }

    pub fn star(self) -> Self {
        Term::ReflexiveClosure(Box::new(self))
    }

    /// `self;next`, flattening nested compositions
    pub fn then(self, next: Term) -> Self {
        compose([self, next])
    }

    /// `self \/ other`, flattening nested unions
    pub fn or(self, other: Term) -> Self {
        union([self, other])
    }

    /// `self /\ other`, flattening nested intersections
    ///
    /// Restricting `a /\ b` by `c` yields `a /\ b /\ c`, not `(a /\ b) /\ c`.
    pub fn and(self, other: Term) -> Self {
        intersect([self, other])
    }

    /// `self - other`
    pub fn minus(self, other: Term) -> Self {
        Term::Difference(Box::new(self), Box::new(other))
    }

    fn precedence(&self) -> u8 {
        match self {
            Term::Union(_) | Term::Intersect(_) => 1,
            Term::Difference(_, _) => 2,
            Term::Compose(_) => 3,
            Term::Complement(_) => 4,
            _ => 5,
        }
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    fn write_joined(
        f: &mut fmt::Formatter<'_>,
        terms: &[Term],
        separator: &str,
        min: u8,
    ) -> fmt::Result {
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            term.write_operand(f, min)?;
        }
        Ok(())
    }
}

/// Compose a sequence of terms; a single term is returned unchanged
pub fn compose(terms: impl IntoIterator<Item = Term>) -> Term {
    flatten(terms, Term::Compose, |t| match t {
        Term::Compose(inner) => Ok(inner),
        other => Err(other),
    })
}

/// Union of a sequence of terms; a single term is returned unchanged
pub fn union(terms: impl IntoIterator<Item = Term>) -> Term {
    flatten(terms, Term::Union, |t| match t {
        Term::Union(inner) => Ok(inner),
        other => Err(other),
    })
}

/// Intersection of a sequence of terms; a single term is returned unchanged
pub fn intersect(terms: impl IntoIterator<Item = Term>) -> Term {
    flatten(terms, Term::Intersect, |t| match t {
        Term::Intersect(inner) => Ok(inner),
        other => Err(other),
    })
}

fn flatten(
    terms: impl IntoIterator<Item = Term>,
    wrap: fn(Vec<Term>) -> Term,
    split: fn(Term) -> std::result::Result<Vec<Term>, Term>,
) -> Term {
    let mut flat = Vec::new();
    for term in terms {
        match split(term) {
            Ok(inner) => flat.extend(inner),
            Err(other) => flat.push(other),
        }
    }

    if flat.len() == 1 {
        if let Some(only) = flat.pop() {
            return only;
        }
    }
    wrap(flat)
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Identity(concept) => write!(f, "I[{}]", concept),
            Term::Universal(concept) => write!(f, "V[{}]", concept),
            Term::Relation { name, signature } => write!(f, "{}[{}]", name, signature),
            Term::Literal(text) => f.write_str(&quote(text)),
            Term::Converse(inner) => {
                inner.write_operand(f, 5)?;
                f.write_str("~")
            }
            Term::Closure(inner) => {
                inner.write_operand(f, 5)?;
                f.write_str("+")
            }
            Term::ReflexiveClosure(inner) => {
                inner.write_operand(f, 5)?;
                f.write_str("*")
            }
            Term::Complement(inner) => {
                f.write_str("-")?;
                inner.write_operand(f, 5)
            }
            Term::Compose(terms) => Term::write_joined(f, terms, ";", 3),
            Term::Difference(left, right) => {
                left.write_operand(f, 3)?;
                f.write_str(" - ")?;
                right.write_operand(f, 3)
            }
            // Same-kind children are flattened on construction; anything else
            // at precedence 1 is the other kind and gets parentheses.
            Term::Union(terms) => Term::write_joined(f, terms, " \\/ ", 3),
            Term::Intersect(terms) => Term::write_joined(f, terms, " /\\ ", 3),
        }
    }
}

/// An inclusion rule `antecedent |- consequent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inclusion {
    pub antecedent: Term,
    pub consequent: Term,
}

impl Inclusion {
    pub fn new(antecedent: Term, consequent: Term) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    /// Same rule, checked only where `predicate` holds on the antecedent side
    pub fn restrict(&self, predicate: Term) -> Self {
        Self {
            antecedent: self.antecedent.clone().and(predicate),
            consequent: self.consequent.clone(),
        }
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} |- {}", self.antecedent, self.consequent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(concept: &str) -> Term {
        Term::relation("composition", concept)
    }

    #[test]
    fn test_atoms() {
        assert_eq!(Term::identity("Element").to_string(), "I[Element]");
        assert_eq!(Term::universal("BusinessObject").to_string(), "V[BusinessObject]");
        assert_eq!(
            Term::relation("level", "Element*Level").to_string(),
            "level[Element*Level]"
        );
        assert_eq!(Term::literal("a\"b").to_string(), "\"a\\\"b\"");
    }

    #[test]
    fn test_postfix_chain() {
        let t = c("BusinessProcess").converse().plus();
        assert_eq!(t.to_string(), "composition[BusinessProcess]~+");
    }

    #[test]
    fn test_difference_inside_composition_is_parenthesized() {
        let roots = Term::identity("BusinessObject").minus(
            c("BusinessObject").converse().then(c("BusinessObject")),
        );
        let t = compose([roots.clone(), Term::universal("BusinessObject"), roots]);
        assert_eq!(
            t.to_string(),
            "(I[BusinessObject] - composition[BusinessObject]~;composition[BusinessObject]);\
             V[BusinessObject];\
             (I[BusinessObject] - composition[BusinessObject]~;composition[BusinessObject])"
        );
    }

    #[test]
    fn test_mixed_union_and_intersection() {
        let el = || Term::identity("Element");
        let t = el()
            .minus(c("Element").converse().then(c("Element")))
            .or(el().and(Term::literal("x")));
        assert_eq!(
            t.to_string(),
            "(I[Element] - composition[Element]~;composition[Element]) \\/ (I[Element] /\\ \"x\")"
        );
    }

    #[test]
    fn test_union_inside_composition_and_closure() {
        let o = Term::relation("association", "BusinessObject");
        let t = Term::identity("BusinessObject").or(o.clone().or(o.converse()).plus());
        assert_eq!(
            t.to_string(),
            "I[BusinessObject] \\/ (association[BusinessObject] \\/ association[BusinessObject]~)+"
        );
    }

    #[test]
    fn test_complement_and_converse_of_composition() {
        assert_eq!(
            Term::identity("Element").complement().to_string(),
            "-I[Element]"
        );
        let t = Term::relation("a", "X").then(Term::relation("b", "X")).converse();
        assert_eq!(t.to_string(), "(a[X];b[X])~");
    }

    #[test]
    fn test_and_flattens_existing_intersection() {
        let t = Term::relation("p", "X")
            .and(Term::relation("q", "X"))
            .and(Term::relation("r", "X"));
        assert_eq!(t, intersect([Term::relation("p", "X"), Term::relation("q", "X"), Term::relation("r", "X")]));
        assert_eq!(t.to_string(), "p[X] /\\ q[X] /\\ r[X]");
    }

    #[test]
    fn test_single_operand_is_unwrapped() {
        let t = union([Term::literal("0")]);
        assert_eq!(t, Term::literal("0"));
    }

    #[test]
    fn test_inclusion_restrict() {
        let rule = Inclusion::new(
            Term::identity("BusinessFunction"),
            Term::relation("r", "BusinessFunction"),
        );
        let restricted = rule.restrict(Term::relation("lvl", "BusinessFunction"));
        assert_eq!(
            restricted.to_string(),
            "I[BusinessFunction] /\\ lvl[BusinessFunction] |- r[BusinessFunction]"
        );
        assert_eq!(rule.to_string(), "I[BusinessFunction] |- r[BusinessFunction]");
    }
}
