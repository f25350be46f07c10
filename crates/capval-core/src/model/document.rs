//! Model document format
//!
//! A model document is the on-disk export of a host architecture model:
//!
//! ```yaml
//! elements:
//!   - id: bf1
//!     type: business-function
//!     name: Sales
//!     properties:
//!       Level: ["0", "1"]
//! relationships:
//!   - id: r1
//!     type: access-relationship
//!     source: bf1
//!     target: bo1
//! ```
//!
//! Files ending in `.json` are read as JSON, everything else as YAML.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{CapValError, Result};

use super::element::{Element, ElementType};
use super::graph::Model;
use super::relationship::{Relationship, RelationshipType};

/// Top-level model document
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub elements: Vec<ElementRecord>,

    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

/// Element entry
#[derive(Debug, Clone, Deserialize)]
pub struct ElementRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub element_type: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Property values may be a scalar or a list of scalars
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Relationship entry
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub relationship_type: String,

    pub source: String,

    pub target: String,
}

/// A property value as written in the document
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    One(Scalar),
    Many(Vec<Scalar>),
}

/// Scalar property value; numbers are accepted so that `Level: 0` works
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
        }
    }
}

impl PropertyValue {
    fn into_values(self) -> Vec<String> {
        match self {
            PropertyValue::One(value) => vec![value.into_text()],
            PropertyValue::Many(values) => values.into_iter().map(Scalar::into_text).collect(),
        }
    }
}

/// Parse a model document from YAML text
///
/// # Errors
///
/// Returns `ModelParse` on malformed input; `origin` names the source in the error.
pub fn parse_yaml(content: &str, origin: &str) -> Result<ModelDocument> {
    serde_yaml::from_str(content).map_err(|e| CapValError::ModelParse {
        path: origin.to_string(),
        message: format!("YAML parse error: {}", e),
    })
}

/// Parse a model document from JSON text
///
/// # Errors
///
/// Returns `ModelParse` on malformed input; `origin` names the source in the error.
pub fn parse_json(content: &str, origin: &str) -> Result<ModelDocument> {
    serde_json::from_str(content).map_err(|e| CapValError::ModelParse {
        path: origin.to_string(),
        message: format!("JSON parse error: {}", e),
    })
}

/// Read and parse a model document, choosing the format by extension
///
/// # Errors
///
/// Returns `ModelParse` if the file cannot be read or parsed.
pub fn read_document(path: &Path) -> Result<ModelDocument> {
    let origin = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| CapValError::ModelParse {
        path: origin.clone(),
        message: format!("Failed to read model file: {}", e),
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        parse_json(&content, &origin)
    } else {
        parse_yaml(&content, &origin)
    }
}

impl ModelDocument {
    /// Build the host model, deduplicating ids (first occurrence wins)
    ///
    /// # Errors
    ///
    /// Returns `UnknownElementRef` if a relationship endpoint is not a
    /// document element.
    pub fn into_model(self) -> Result<Model> {
        let mut model = Model::new();

        for record in self.elements {
            let mut element = Element::new(
                record.id,
                ElementType::parse(&record.element_type),
                record.name.unwrap_or_default(),
            );
            for (key, value) in record.properties {
                for v in value.into_values() {
                    element.properties.insert(key.clone(), v);
                }
            }

            let id = element.id.clone();
            if !model.insert_element(element) {
                tracing::debug!(element_id = %id, "duplicate element id ignored");
            }
        }

        for record in self.relationships {
            let relationship = Relationship::new(
                record.id,
                RelationshipType::parse(&record.relationship_type),
                record.source,
                record.target,
            );

            let id = relationship.id.clone();
            if !model.insert_relationship(relationship)? {
                tracing::debug!(relationship_id = %id, "duplicate relationship id ignored");
            }
        }

        Ok(model)
    }
}

/// Read a model file straight into a [`Model`]
///
/// # Errors
///
/// Returns `ModelParse` or `UnknownElementRef`.
pub fn load_model(path: &Path) -> Result<Model> {
    read_document(path)?.into_model()
}
