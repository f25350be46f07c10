use std::collections::HashMap;

use crate::errors::{CapValError, Result};

use super::element::Element;
use super::relationship::Relationship;

/// In-memory host model: every element and relationship, indexed by id
///
/// Insertion order is preserved because it drives the order of generated
/// population tuples. Ids are deduplicated on insert (first one wins).
#[derive(Debug, Clone, Default)]
pub struct Model {
    elements: Vec<Element>,
    element_index: HashMap<String, usize>,
    relationships: Vec<Relationship>,
    relationship_index: HashMap<String, usize>,
}

impl Model {
    /// Create a new empty Model
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element
    ///
    /// Returns `false` (and keeps the existing element) if the id is taken.
    pub fn insert_element(&mut self, element: Element) -> bool {
        if self.element_index.contains_key(&element.id) {
            return false;
        }
        self.element_index
            .insert(element.id.clone(), self.elements.len());
        self.elements.push(element);
        true
    }

    /// Insert a relationship whose endpoints are already in the model
    ///
    /// Returns `Ok(false)` if the relationship id is taken.
    ///
    /// # Errors
    ///
    /// Returns `UnknownElementRef` if either endpoint is not a model element.
    pub fn insert_relationship(&mut self, relationship: Relationship) -> Result<bool> {
        for endpoint in [&relationship.source_id, &relationship.target_id] {
            if !self.element_index.contains_key(endpoint) {
                return Err(CapValError::UnknownElementRef {
                    relationship_id: relationship.id.clone(),
                    element_id: endpoint.clone(),
                });
            }
        }

        if self.relationship_index.contains_key(&relationship.id) {
            return Ok(false);
        }
        self.relationship_index
            .insert(relationship.id.clone(), self.relationships.len());
        self.relationships.push(relationship);
        Ok(true)
    }

    /// Get an element by id
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.element_index.get(id).map(|&i| &self.elements[i])
    }

    /// Get a relationship by id
    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationship_index
            .get(id)
            .map(|&i| &self.relationships[i])
    }

    /// All elements in insertion order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// All relationships in insertion order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementType, RelationshipType};

    #[test]
    fn test_duplicate_element_ignored() {
        let mut model = Model::new();
        assert!(model.insert_element(Element::new("e1", ElementType::BusinessObject, "First")));
        assert!(!model.insert_element(Element::new("e1", ElementType::BusinessObject, "Second")));

        assert_eq!(model.elements().len(), 1);
        assert_eq!(model.element("e1").map(|e| e.name.as_str()), Some("First"));
    }

    #[test]
    fn test_dangling_endpoint_rejected() {
        let mut model = Model::new();
        model.insert_element(Element::new("bf1", ElementType::BusinessFunction, "F"));

        let result = model.insert_relationship(Relationship::new(
            "r1",
            RelationshipType::Access,
            "bf1",
            "missing",
        ));

        assert_eq!(
            result,
            Err(CapValError::UnknownElementRef {
                relationship_id: "r1".to_string(),
                element_id: "missing".to_string(),
            })
        );
        assert!(model.relationships().is_empty());
    }
}
