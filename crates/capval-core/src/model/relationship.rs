use super::element::pascal_case;

/// Suffix the host appends to relationship type names
const HOST_SUFFIX: &str = "-relationship";

/// Relationship type
///
/// The catalog reasons about the first five; any other type is populated
/// but otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationshipType {
    Access,
    Aggregation,
    Association,
    Serving,
    Composition,
    /// Any other host type, stored as its relation name
    Other(String),
}

impl RelationshipType {
    /// Parse a host type name; `access` and `access-relationship` are equivalent
    ///
    /// Other suffixed names keep their first word (`triggering-relationship`
    /// is `triggering`); other unsuffixed names are PascalCased, so that
    /// every relation name is a valid identifier.
    pub fn parse(name: &str) -> Self {
        let bare = name.strip_suffix(HOST_SUFFIX);
        match bare.unwrap_or(name) {
            "access" => RelationshipType::Access,
            "aggregation" => RelationshipType::Aggregation,
            "association" => RelationshipType::Association,
            "serving" => RelationshipType::Serving,
            "composition" => RelationshipType::Composition,
            other => match bare {
                Some(_) => RelationshipType::Other(
                    other.split('-').next().unwrap_or_default().to_string(),
                ),
                None => RelationshipType::Other(pascal_case(other)),
            },
        }
    }

    /// Relation name used in the generated specification
    pub fn relation_name(&self) -> &str {
        match self {
            RelationshipType::Access => "access",
            RelationshipType::Aggregation => "aggregation",
            RelationshipType::Association => "association",
            RelationshipType::Serving => "serving",
            RelationshipType::Composition => "composition",
            RelationshipType::Other(name) => name,
        }
    }
}

/// Relationship - a directed edge of the architecture model
///
/// Endpoints are non-owning references by element id; they are resolved
/// against the [`Model`](super::Model) when the relationship is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Host identifier, unique among relationships
    pub id: String,

    /// Relationship type
    pub relationship_type: RelationshipType,

    /// Source element id (the parent, for composition)
    pub source_id: String,

    /// Target element id (the child, for composition)
    pub target_id: String,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        relationship_type: RelationshipType,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            relationship_type,
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }
}
