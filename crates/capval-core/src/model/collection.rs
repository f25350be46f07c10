use std::collections::HashSet;

use crate::errors::{CapValError, Result};

use super::element::Element;
use super::graph::Model;
use super::relationship::Relationship;

/// A relationship with both endpoints resolved against the model
#[derive(Debug, Clone, Copy)]
pub struct Link<'m> {
    pub relationship: &'m Relationship,
    pub source: &'m Element,
    pub target: &'m Element,
}

/// The unit of analysis: ordered, id-deduplicated elements and relationships
///
/// Links keep their resolved endpoints even when those endpoints are not
/// part of the collection's own element list.
#[derive(Debug, Clone, Default)]
pub struct Collection<'m> {
    elements: Vec<&'m Element>,
    links: Vec<Link<'m>>,
}

impl<'m> Collection<'m> {
    /// Build a collection, dropping repeated element and relationship ids
    pub fn new(
        elements: impl IntoIterator<Item = &'m Element>,
        links: impl IntoIterator<Item = Link<'m>>,
    ) -> Self {
        let mut seen = HashSet::new();
        let elements = elements
            .into_iter()
            .filter(|e| seen.insert(e.id.as_str()))
            .collect();

        let mut seen = HashSet::new();
        let links = links
            .into_iter()
            .filter(|l| seen.insert(l.relationship.id.as_str()))
            .collect();

        Self { elements, links }
    }

    /// Elements in collection order
    pub fn elements(&self) -> &[&'m Element] {
        &self.elements
    }

    /// Resolved relationships in collection order
    pub fn links(&self) -> &[Link<'m>] {
        &self.links
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.links.len()
    }

    /// Check if the collection has neither elements nor relationships
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.links.is_empty()
    }
}

impl Model {
    /// Resolve a relationship's endpoints
    ///
    /// Relationships inside a `Model` always resolve; `None` only happens for
    /// relationships that were never inserted.
    pub fn link<'m>(&'m self, relationship: &'m Relationship) -> Option<Link<'m>> {
        Some(Link {
            relationship,
            source: self.element(&relationship.source_id)?,
            target: self.element(&relationship.target_id)?,
        })
    }

    /// Project the whole model
    pub fn full_collection(&self) -> Collection<'_> {
        Collection::new(
            self.elements(),
            self.relationships().iter().filter_map(|r| self.link(r)),
        )
    }

    /// Project a selection of ids
    ///
    /// Selected element ids contribute their elements. A relationship is
    /// included when its own id is selected or when both of its endpoints are.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSelectionId` for an id that names nothing in the model.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Collection<'_>> {
        let selected: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();

        for id in ids {
            let id = id.as_ref();
            if self.element(id).is_none() && self.relationship(id).is_none() {
                return Err(CapValError::UnknownSelectionId { id: id.to_string() });
            }
        }

        // Model order, not selection order, so output does not depend on how
        // the ids were listed.
        let elements = self
            .elements()
            .iter()
            .filter(|e| selected.contains(e.id.as_str()));

        let links = self
            .relationships()
            .iter()
            .filter(|r| {
                selected.contains(r.id.as_str())
                    || (selected.contains(r.source_id.as_str())
                        && selected.contains(r.target_id.as_str()))
            })
            .filter_map(|r| self.link(r));

        Ok(Collection::new(elements, links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementType, RelationshipType};

    fn sample_model() -> Model {
        let mut model = Model::new();
        model.insert_element(Element::new("bf1", ElementType::BusinessFunction, "F1"));
        model.insert_element(Element::new("bf2", ElementType::BusinessFunction, "F2"));
        model.insert_element(Element::new("bo1", ElementType::BusinessObject, "O1"));
        model
            .insert_relationship(Relationship::new("r1", RelationshipType::Access, "bf1", "bo1"))
            .unwrap();
        model
            .insert_relationship(Relationship::new("r2", RelationshipType::Access, "bf2", "bo1"))
            .unwrap();
        model
    }

    #[test]
    fn test_full_collection_counts() {
        let model = sample_model();
        let collection = model.full_collection();

        assert_eq!(collection.element_count(), 3);
        assert_eq!(collection.relationship_count(), 2);
    }

    #[test]
    fn test_selection_pulls_in_relationships_between_selected_elements() {
        let model = sample_model();
        let collection = model.select(&["bo1", "bf1"]).unwrap();

        let ids: Vec<&str> = collection.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["bf1", "bo1"]);
        assert_eq!(collection.relationship_count(), 1);
        assert_eq!(collection.links()[0].relationship.id, "r1");
    }

    #[test]
    fn test_selected_relationship_keeps_unselected_endpoints() {
        let model = sample_model();
        let collection = model.select(&["r2"]).unwrap();

        assert_eq!(collection.element_count(), 0);
        assert_eq!(collection.links()[0].source.id, "bf2");
    }

    #[test]
    fn test_unknown_selection_id() {
        let model = sample_model();
        assert_eq!(
            model.select(&["nope"]).unwrap_err(),
            CapValError::UnknownSelectionId {
                id: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_collection_dedups_by_id() {
        let model = sample_model();
        let bf1 = model.element("bf1").unwrap();
        let collection = Collection::new([bf1, bf1], Vec::<Link>::new());

        assert_eq!(collection.element_count(), 1);
    }
}
