//! The fourteen rule families
//!
//! Every family is written once against a [`TermEncoding`]; only the level
//! predicate and the association relation differ between encodings.

use crate::algebra::{compose, Inclusion, Term};
use crate::model::Level;

use super::encoding::{TermEncoding, BUSINESS_OBJECT, ELEMENT};
use super::instance::{Family, RelationKind};
use super::RuleDefinition;

const BUSINESS_FUNCTION: &str = "BusinessFunction";
const BUSINESS_PROCESS: &str = "BusinessProcess";

/// Relation names shared by both encodings
struct Vocabulary<'e> {
    encoding: &'e dyn TermEncoding,
}

impl<'e> Vocabulary<'e> {
    fn access(&self) -> Term {
        Term::relation(
            "access",
            format!("{}*{}", BUSINESS_FUNCTION, BUSINESS_OBJECT),
        )
    }

    fn aggregation(&self) -> Term {
        Term::relation(
            "aggregation",
            format!("{}*{}", BUSINESS_FUNCTION, BUSINESS_PROCESS),
        )
    }

    fn serving(&self) -> Term {
        Term::relation("serving", BUSINESS_FUNCTION)
    }

    fn association(&self) -> Term {
        self.encoding.association()
    }

    fn relation(&self, kind: RelationKind) -> Term {
        match kind {
            RelationKind::Access => self.access(),
            RelationKind::Aggregation => self.aggregation(),
            RelationKind::Association => self.association(),
            RelationKind::Serving => self.serving(),
        }
    }

    fn composition(&self, concept: &str) -> Term {
        Term::relation("composition", concept)
    }

    fn level(&self, levels: Option<&[Level]>) -> Term {
        self.encoding.level_predicate(levels)
    }

    /// Elements of `concept` without a parent
    fn roots(&self, concept: &str) -> Term {
        let c = self.composition(concept);
        Term::identity(concept).minus(c.clone().converse().then(c))
    }

    /// Elements of `concept` without children
    fn leaves(&self, concept: &str) -> Term {
        let c = self.composition(concept);
        Term::identity(concept).minus(c.clone().then(c.converse()))
    }

    /// `g;c(bp)~+;c(bp)+;g~`: functions aggregating processes with a common ancestor
    fn shared_process_ancestor(&self) -> Term {
        let c = self.composition(BUSINESS_PROCESS);
        compose([
            self.aggregation(),
            c.clone().converse().plus(),
            c.plus(),
            self.aggregation().converse(),
        ])
    }
}

fn rule(label: impl Into<String>, antecedent: Term, consequent: Term, meaning: impl Into<String>) -> RuleDefinition {
    RuleDefinition::new(label, Inclusion::new(antecedent, consequent), meaning)
}

/// Universal body of every family, in catalog order
pub(super) fn universal_bodies(encoding: &dyn TermEncoding) -> Vec<(Family, Vec<RuleDefinition>)> {
    let vocab = Vocabulary { encoding };
    Family::catalog()
        .into_iter()
        .map(|family| (family, body(&vocab, family)))
        .collect()
}

/// Restrict each rule of a universal body to elements tagged at `level`
pub(super) fn level_variant(
    encoding: &dyn TermEncoding,
    universal: &[RuleDefinition],
    level: Level,
) -> Vec<RuleDefinition> {
    let predicate = encoding.level_predicate(Some(&[level][..]));
    universal
        .iter()
        .map(|def| RuleDefinition {
            label: format!("{}_L{}", def.label, level),
            inclusion: def.inclusion.restrict(predicate.clone()),
            meaning: format!("At level {}: {}", level, def.meaning),
        })
        .collect()
}

fn body(v: &Vocabulary<'_>, family: Family) -> Vec<RuleDefinition> {
    let el = ELEMENT;
    let bf = BUSINESS_FUNCTION;
    let bo = BUSINESS_OBJECT;
    let bp = BUSINESS_PROCESS;
    let a = || v.access();
    let g = || v.aggregation();
    let o = || v.association();
    let s = || v.serving();
    let c = |concept: &str| v.composition(concept);

    match family {
        Family::C0 => {
            let mut rules = vec![rule(
                "C0_supported_level_assigned",
                Term::identity(el),
                v.level(Some(&Level::ALL[..])),
                "Each element has a supported decomposition level assigned.",
            )];
            for level in Level::ALL {
                let Some(parent) = level.parent() else {
                    continue;
                };
                let has_parent_at = Term::identity(el).and(compose([
                    c(el).converse(),
                    v.level(Some(&[parent][..])),
                    c(el),
                ]));
                rules.push(rule(
                    format!("C0_L{}_composed_by_L{}", level, parent),
                    Term::identity(el).and(v.level(Some(&[level][..]))),
                    v.roots(el).or(has_parent_at),
                    format!(
                        "Each element at level {} has no parent or a parent at level {}.",
                        level, parent
                    ),
                ));
            }
            rules
        }
        Family::C1 => vec![rule(
            "C1_one_parent",
            c(el).then(c(el).converse()),
            Term::identity(el),
            "Each element has at most one parent.",
        )],
        Family::C2 => vec![rule(
            "C2_acyclic",
            c(el).plus(),
            Term::identity(el).complement(),
            "No element can be its own ancestor.",
        )],
        Family::C3 => [bf, bo, bp]
            .into_iter()
            .flat_map(|concept| {
                [
                    rule(
                        format!("C3_shared_root_level_{}", concept),
                        compose([v.roots(concept), Term::universal(concept), v.roots(concept)]),
                        v.level(None),
                        format!("All root {} elements share the same decomposition level.", concept),
                    ),
                    rule(
                        format!("C3_shared_leaf_level_{}", concept),
                        compose([v.leaves(concept), Term::universal(concept), v.leaves(concept)]),
                        v.level(None),
                        format!("All leaf {} elements share the same decomposition level.", concept),
                    ),
                ]
            })
            .collect(),
        Family::C4(kind) => {
            let t = v.relation(kind);
            let mut consequent = Term::identity(el).or(t.clone());
            if kind == RelationKind::Serving {
                consequent = consequent.or(v.shared_process_ancestor());
            }
            vec![rule(
                format!("C4_{}_inherited_upward", kind.name()),
                compose([c(el), t, c(el).converse()]),
                consequent,
                format!(
                    "If two elements have a(n) {} relationship, their parents (if any) must as well.",
                    kind.name()
                ),
            )]
        }
        Family::C5(kind) => {
            let t = v.relation(kind);
            vec![rule(
                format!("C5_{}_exists_downward", kind.name()),
                t.clone(),
                compose([c(el), t.clone(), c(el).converse()])
                    .or(compose([v.leaves(el), t, v.leaves(el)])),
                format!(
                    "If two elements have a(n) {} relationship, at least one pair of children (if any) must as well.",
                    kind.name()
                ),
            )]
        }
        Family::C6 => vec![rule(
            "C6_function_must_access_object",
            Term::identity(bf),
            a().then(a().converse()),
            "Each business function must access at least one business object.",
        )],
        Family::C7 => vec![rule(
            "C7_object_is_accessed",
            Term::identity(bo),
            a().converse().then(a()),
            "Each business object must be accessed by at least one business function.",
        )],
        Family::C8 => vec![
            rule(
                "C8_process_is_aggregated",
                Term::identity(bp),
                g().converse().then(g()),
                "Each business process must be aggregated by at least one business function.",
            ),
            rule(
                "C8_process_aggregated_only_once",
                g().then(g().converse()),
                Term::identity(bf),
                "Each business process must be aggregated by at most one business function.",
            ),
        ],
        Family::C9 => vec![rule(
            "C9_function_eventually_aggregates_process",
            Term::identity(bf),
            compose([
                Term::identity(bf).or(s().plus()),
                g(),
                g().converse(),
                Term::identity(bf).or(s().converse().plus()),
            ]),
            "Each business function must either (1) aggregate a business process or (2) serve \
             another function, potentially through multiple serving relationships, that \
             aggregates a business process.",
        )],
        Family::C10 => vec![rule(
            "C10_association_allowed",
            o(),
            compose([
                a().converse(),
                Term::identity(bf)
                    .or(s().converse())
                    .or(v.shared_process_ancestor()),
                a(),
            ]),
            "An association relationship between business objects is allowed if they are \
             accessed (1) by the same business function, (2) by functions with a serving \
             relationship in the opposite direction, or (3) by functions that aggregate business \
             processes with a common ancestor.",
        )],
        Family::C11 => vec![rule(
            "C11_shared_object",
            a().then(a().converse()),
            Term::identity(bf)
                .or(compose([
                    s().or(s().converse()),
                    a(),
                    a().converse(),
                ]))
                .or(v.shared_process_ancestor()),
            "Business functions that access a common business object must (1) have a serving \
             relationship to at least one other business function that accesses the same \
             object, or (2) aggregate business processes with a common ancestor.",
        )],
        Family::C12 => vec![rule(
            "C12_serving_mirrored_by_association",
            s(),
            compose([a(), Term::identity(bo).or(o().converse()), a().converse()]),
            "Each serving relationship between business functions must have a corresponding \
             association relationship between business objects in the opposite direction.",
        )],
        Family::C13 => vec![rule(
            "C13_connected_graph",
            c(bp)
                .converse()
                .plus()
                .then(c(bp).plus())
                .and(v.level(None)),
            compose([
                g().converse(),
                a(),
                Term::identity(bo).or(o().or(o().converse()).plus()),
                a().converse(),
                g(),
            ]),
            "At least one business object per descendant of a business process must be part of \
             a connected graph.",
        )],
    }
}
