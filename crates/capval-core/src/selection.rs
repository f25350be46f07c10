//! Rule selection engine
//!
//! Infers, from the relationship content of a collection, which rule
//! instances are worth checking and at which levels.
//!
//! ## Algorithm
//!
//! 1. Compute a [`LevelProfile`]: the levels touched by each relationship
//!    family and by the collection as a whole.
//! 2. Always select the structural families C0 to C3.
//! 3. Select `C4_k` and `C5_k` when relation kind `k` spans more than one
//!    level.
//! 4. For C6 to C13, select the universal form when every required family
//!    covers all touched levels; otherwise select `<family>_L<ℓ>` for each
//!    touched level `ℓ` present in every required family.
//!
//! The result is ordered by catalog position and contains no duplicates.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::catalog::{Family, RelationKind, RuleInstance};
use crate::model::{Collection, ElementType, Level, RelationshipType};

/// A relationship family: one (type, source type, target type) signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationFamily {
    Access,
    Aggregation,
    Association,
    ProcessComposition,
    Serving,
}

impl RelationFamily {
    pub const ALL: [RelationFamily; 5] = [
        RelationFamily::Access,
        RelationFamily::Aggregation,
        RelationFamily::Association,
        RelationFamily::ProcessComposition,
        RelationFamily::Serving,
    ];

    /// Relationship type, source type and target type of the family
    pub fn signature(self) -> (RelationshipType, ElementType, ElementType) {
        match self {
            RelationFamily::Access => (
                RelationshipType::Access,
                ElementType::BusinessFunction,
                ElementType::BusinessObject,
            ),
            RelationFamily::Aggregation => (
                RelationshipType::Aggregation,
                ElementType::BusinessFunction,
                ElementType::BusinessProcess,
            ),
            RelationFamily::Association => (
                RelationshipType::Association,
                ElementType::BusinessObject,
                ElementType::BusinessObject,
            ),
            RelationFamily::ProcessComposition => (
                RelationshipType::Composition,
                ElementType::BusinessProcess,
                ElementType::BusinessProcess,
            ),
            RelationFamily::Serving => (
                RelationshipType::Serving,
                ElementType::BusinessFunction,
                ElementType::BusinessFunction,
            ),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RelationFamily::Access => "access",
            RelationFamily::Aggregation => "aggregation",
            RelationFamily::Association => "association",
            RelationFamily::ProcessComposition => "process-composition",
            RelationFamily::Serving => "serving",
        }
    }
}

impl From<RelationKind> for RelationFamily {
    fn from(kind: RelationKind) -> Self {
        match kind {
            RelationKind::Access => RelationFamily::Access,
            RelationKind::Aggregation => RelationFamily::Aggregation,
            RelationKind::Association => RelationFamily::Association,
            RelationKind::Serving => RelationFamily::Serving,
        }
    }
}

/// Relationship families a coverage family needs at a level
///
/// Empty for families that are not level-scoped.
pub fn required_families(family: Family) -> &'static [RelationFamily] {
    match family {
        Family::C6 | Family::C7 | Family::C11 => &[RelationFamily::Access],
        Family::C8 => &[RelationFamily::Aggregation],
        Family::C9 => &[RelationFamily::Aggregation, RelationFamily::Serving],
        Family::C10 | Family::C12 | Family::C13 => &RelationFamily::ALL,
        _ => &[],
    }
}

/// Levels touched per relationship family and overall
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelProfile {
    families: BTreeMap<RelationFamily, BTreeSet<Level>>,
    all: BTreeSet<Level>,
}

impl LevelProfile {
    /// Compute the profile of a collection
    ///
    /// A family touches the primary level of both endpoints of each of its
    /// relationships. A family whose source and target types coincide also
    /// touches every level at which exactly one element of that type sits in
    /// the collection. Only an element's first level tag places it.
    pub fn compute(collection: &Collection<'_>) -> Self {
        let mut profile = Self::default();

        for link in collection.links() {
            profile.all.extend(link.source.primary_level());
            profile.all.extend(link.target.primary_level());
        }

        for family in RelationFamily::ALL {
            let (relationship_type, source_type, target_type) = family.signature();
            let mut levels: BTreeSet<Level> = collection
                .links()
                .iter()
                .filter(|l| {
                    l.relationship.relationship_type == relationship_type
                        && l.source.element_type == source_type
                        && l.target.element_type == target_type
                })
                .flat_map(|l| {
                    l.source
                        .primary_level()
                        .into_iter()
                        .chain(l.target.primary_level())
                })
                .collect();

            if source_type == target_type {
                for level in Level::ALL {
                    let count = collection
                        .elements()
                        .iter()
                        .filter(|e| {
                            e.element_type == source_type && e.primary_level() == Some(level)
                        })
                        .count();
                    if count == 1 {
                        levels.insert(level);
                    }
                }
            }

            profile.families.insert(family, levels);
        }

        profile
    }

    /// Build a profile from explicit level sets; families not listed touch nothing
    pub fn from_levels(
        families: impl IntoIterator<Item = (RelationFamily, BTreeSet<Level>)>,
        all: BTreeSet<Level>,
    ) -> Self {
        let mut profile = Self {
            families: RelationFamily::ALL
                .into_iter()
                .map(|f| (f, BTreeSet::new()))
                .collect(),
            all,
        };
        profile.families.extend(families);
        profile
    }

    /// Levels touched by one family
    pub fn levels(&self, family: RelationFamily) -> &BTreeSet<Level> {
        static EMPTY: BTreeSet<Level> = BTreeSet::new();
        self.families.get(&family).unwrap_or(&EMPTY)
    }

    /// Levels touched by any relationship
    pub fn all(&self) -> &BTreeSet<Level> {
        &self.all
    }

    /// Check if every required family covers all touched levels
    fn covers_all(&self, required: &[RelationFamily]) -> bool {
        !self.all.is_empty()
            && required
                .iter()
                .all(|f| self.levels(*f).is_superset(&self.all))
    }
}

impl fmt::Display for LevelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(levels: &BTreeSet<Level>) -> String {
            let items: Vec<&str> = levels.iter().map(|l| l.as_str()).collect();
            format!("{{{}}}", items.join(", "))
        }

        for family in RelationFamily::ALL {
            writeln!(f, "{:<20} {}", family.name(), list(self.levels(family)))?;
        }
        write!(f, "{:<20} {}", "all", list(&self.all))
    }
}

/// Ordered, duplicate-free list of selected rule instances
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedRuleSet {
    instances: Vec<RuleInstance>,
}

impl SelectedRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance; returns `false` if it was already selected
    pub fn push(&mut self, instance: RuleInstance) -> bool {
        if self.instances.contains(&instance) {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn contains(&self, instance: &RuleInstance) -> bool {
        self.instances.contains(instance)
    }

    /// Check if any instance of `family` (universal or per level) is selected
    pub fn contains_family(&self, family: Family) -> bool {
        self.instances.iter().any(|i| i.family == family)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Comma-separated instance ids
    pub fn ids(&self) -> String {
        self.instances
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a SelectedRuleSet {
    type Item = &'a RuleInstance;
    type IntoIter = std::slice::Iter<'a, RuleInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}

/// Select the rule instances relevant to a collection
pub fn select_rules(collection: &Collection<'_>) -> SelectedRuleSet {
    let profile = LevelProfile::compute(collection);
    tracing::debug!(profile = %profile, "level profile computed");
    select_from_profile(&profile)
}

/// Select rule instances from a precomputed profile
pub fn select_from_profile(profile: &LevelProfile) -> SelectedRuleSet {
    let mut selected = SelectedRuleSet::new();

    for family in [Family::C0, Family::C1, Family::C2, Family::C3] {
        selected.push(RuleInstance::universal(family));
    }

    for kind in RelationKind::ALL {
        if profile.levels(kind.into()).len() > 1 {
            selected.push(RuleInstance::universal(Family::C4(kind)));
            selected.push(RuleInstance::universal(Family::C5(kind)));
        }
    }

    for family in Family::LEVEL_SCOPED {
        let required = required_families(family);
        if profile.covers_all(required) {
            selected.push(RuleInstance::universal(family));
            continue;
        }

        for level in profile.all() {
            if required.iter().all(|f| profile.levels(*f).contains(level)) {
                selected.push(RuleInstance::at_level(family, *level));
            }
        }
    }

    selected
}
