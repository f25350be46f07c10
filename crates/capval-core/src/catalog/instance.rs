use std::cmp::Ordering;
use std::fmt;

use crate::model::Level;

/// Relation kinds governed by the inheritance families C4 and C5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Access,
    Aggregation,
    Association,
    Serving,
}

impl RelationKind {
    /// Catalog order: a, g, o, v
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Access,
        RelationKind::Aggregation,
        RelationKind::Association,
        RelationKind::Serving,
    ];

    /// One-letter key used in rule ids (`C4_a`)
    pub fn symbol(self) -> char {
        match self {
            RelationKind::Access => 'a',
            RelationKind::Aggregation => 'g',
            RelationKind::Association => 'o',
            RelationKind::Serving => 'v',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RelationKind::Access => "access",
            RelationKind::Aggregation => "aggregation",
            RelationKind::Association => "association",
            RelationKind::Serving => "serving",
        }
    }

    fn position(self) -> usize {
        match self {
            RelationKind::Access => 0,
            RelationKind::Aggregation => 1,
            RelationKind::Association => 2,
            RelationKind::Serving => 3,
        }
    }
}

/// Rule family
///
/// Families are ordered by catalog position: `C0 < C1 < C2 < C3 < C4_a <
/// C5_a < C4_g < ... < C5_v < C6 < ... < C13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Supported level assigned; parent one level up
    C0,
    /// At most one composition parent
    C1,
    /// Composition is acyclic
    C2,
    /// Roots share a level, leaves share a level
    C3,
    /// Relationship inherited upward
    C4(RelationKind),
    /// Relationship witnessed downward
    C5(RelationKind),
    C6,
    C7,
    C8,
    C9,
    C10,
    C11,
    C12,
    C13,
}

impl Family {
    /// Every family in catalog order
    pub fn catalog() -> Vec<Family> {
        let mut families = vec![Family::C0, Family::C1, Family::C2, Family::C3];
        for kind in RelationKind::ALL {
            families.push(Family::C4(kind));
            families.push(Family::C5(kind));
        }
        families.extend(Self::LEVEL_SCOPED);
        families
    }

    /// Families with per-level variants
    pub const LEVEL_SCOPED: [Family; 8] = [
        Family::C6,
        Family::C7,
        Family::C8,
        Family::C9,
        Family::C10,
        Family::C11,
        Family::C12,
        Family::C13,
    ];

    /// Check if this family has per-level variants
    pub fn is_level_scoped(self) -> bool {
        Self::LEVEL_SCOPED.contains(&self)
    }

    /// Numeric part of the id for families without a relation kind
    fn ordinal(self) -> usize {
        match self {
            Family::C0 => 0,
            Family::C1 => 1,
            Family::C2 => 2,
            Family::C3 => 3,
            Family::C4(_) => 4,
            Family::C5(_) => 5,
            Family::C6 => 6,
            Family::C7 => 7,
            Family::C8 => 8,
            Family::C9 => 9,
            Family::C10 => 10,
            Family::C11 => 11,
            Family::C12 => 12,
            Family::C13 => 13,
        }
    }

    fn position(self) -> usize {
        match self {
            Family::C0 => 0,
            Family::C1 => 1,
            Family::C2 => 2,
            Family::C3 => 3,
            Family::C4(kind) => 4 + 2 * kind.position(),
            Family::C5(kind) => 5 + 2 * kind.position(),
            Family::C6 => 12,
            Family::C7 => 13,
            Family::C8 => 14,
            Family::C9 => 15,
            Family::C10 => 16,
            Family::C11 => 17,
            Family::C12 => 18,
            Family::C13 => 19,
        }
    }
}

impl Ord for Family {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}

impl PartialOrd for Family {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::C4(kind) => write!(f, "C4_{}", kind.symbol()),
            Family::C5(kind) => write!(f, "C5_{}", kind.symbol()),
            other => write!(f, "C{}", other.ordinal()),
        }
    }
}

/// A concrete selected check: a family's universal form or its restriction
/// to one level
///
/// Ordered by family catalog position, universal form first, then levels
/// ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleInstance {
    pub family: Family,
    pub level: Option<Level>,
}

impl RuleInstance {
    pub fn universal(family: Family) -> Self {
        Self {
            family,
            level: None,
        }
    }

    pub fn at_level(family: Family, level: Level) -> Self {
        Self {
            family,
            level: Some(level),
        }
    }
}

impl fmt::Display for RuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Some(level) => write!(f, "{}_L{}", self.family, level),
            None => write!(f, "{}", self.family),
        }
    }
}
