use super::level::{Level, LEVEL_PROPERTY};
use super::properties::Properties;

/// Architecture element type
///
/// Only the three business types take part in the rule catalog; every other
/// host type is carried through to the population under its own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    BusinessFunction,
    BusinessObject,
    BusinessProcess,
    /// Any other host type, stored in its kebab-case spelling
    Other(String),
}

impl ElementType {
    /// Parse a host type name (`business-function`, `application-component`, ...)
    pub fn parse(name: &str) -> Self {
        match name {
            "business-function" => ElementType::BusinessFunction,
            "business-object" => ElementType::BusinessObject,
            "business-process" => ElementType::BusinessProcess,
            other => ElementType::Other(other.to_string()),
        }
    }

    /// Host (kebab-case) spelling
    pub fn as_str(&self) -> &str {
        match self {
            ElementType::BusinessFunction => "business-function",
            ElementType::BusinessObject => "business-object",
            ElementType::BusinessProcess => "business-process",
            ElementType::Other(name) => name,
        }
    }

    /// Concept name used in the generated specification (`BusinessFunction`)
    pub fn concept_name(&self) -> String {
        pascal_case(self.as_str())
    }
}

/// `application-component` -> `ApplicationComponent`
pub(super) fn pascal_case(kebab: &str) -> String {
    kebab
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Element - a node of the architecture model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Host identifier, unique within the model
    pub id: String,

    /// Element type
    pub element_type: ElementType,

    /// Display name (empty when the host has none)
    pub name: String,

    /// Host properties, including the multi-valued `Level` tag
    pub properties: Properties,
}

impl Element {
    /// Create a new Element with no properties
    pub fn new(id: impl Into<String>, element_type: ElementType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element_type,
            name: name.into(),
            properties: Properties::new(),
        }
    }

    /// Builder-style level tag, appended to any existing tags
    pub fn with_level(mut self, tag: impl Into<String>) -> Self {
        self.properties.insert(LEVEL_PROPERTY, tag);
        self
    }

    /// Raw level tags as stored by the host, supported or not
    pub fn level_tags(&self) -> &[String] {
        self.properties.get_all(LEVEL_PROPERTY)
    }

    /// Supported levels this element is tagged with, in tag order
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.level_tags().iter().filter_map(|tag| Level::parse(tag))
    }

    /// Level the element sits at: its first tag, if that tag is supported
    ///
    /// Further tags are populated but do not place the element at another
    /// level.
    pub fn primary_level(&self) -> Option<Level> {
        self.properties.get(LEVEL_PROPERTY).and_then(Level::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_names() {
        assert_eq!(ElementType::BusinessFunction.concept_name(), "BusinessFunction");
        assert_eq!(
            ElementType::parse("application-component").concept_name(),
            "ApplicationComponent"
        );
        assert_eq!(ElementType::parse("node").concept_name(), "Node");
    }

    #[test]
    fn test_parse_round_trips_host_name() {
        for name in ["business-function", "business-object", "business-process", "actor"] {
            assert_eq!(ElementType::parse(name).as_str(), name);
        }
    }

    #[test]
    fn test_levels_skip_unsupported_tags() {
        let element = Element::new("bf1", ElementType::BusinessFunction, "Sales")
            .with_level("1")
            .with_level("7")
            .with_level("2");

        let levels: Vec<u8> = element.levels().map(Level::value).collect();
        assert_eq!(levels, vec![1, 2]);
        assert_eq!(element.level_tags().len(), 3);
        assert_eq!(element.primary_level(), Some(Level::ALL[1]));
    }

    #[test]
    fn test_primary_level_is_first_tag_only() {
        let unsupported_first = Element::new("bo1", ElementType::BusinessObject, "Order")
            .with_level("7")
            .with_level("1");
        assert_eq!(unsupported_first.primary_level(), None);

        let untagged = Element::new("bo2", ElementType::BusinessObject, "Invoice");
        assert_eq!(untagged.primary_level(), None);
    }
}
