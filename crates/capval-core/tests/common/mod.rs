use std::path::{Path, PathBuf};

use capval_core::model::document::parse_yaml;
use capval_core::{CapValConfig, Element, ElementType, Model, Relationship, RelationshipType};

/// Two functions accessing one shared object, all at level 0, no serving
pub const SHARED_OBJECT_YAML: &str = r#"
elements:
  - id: bf1
    type: business-function
    name: Sales
    properties:
      Level: "0"
  - id: bf2
    type: business-function
    name: Billing
    properties:
      Level: "0"
  - id: bo1
    type: business-object
    name: Customer
    properties:
      Level: "0"
relationships:
  - id: r1
    type: access-relationship
    source: bf1
    target: bo1
  - id: r2
    type: access-relationship
    source: bf2
    target: bo1
"#;

#[allow(dead_code)]
pub fn shared_object_model() -> Model {
    parse_yaml(SHARED_OBJECT_YAML, "shared-object")
        .unwrap()
        .into_model()
        .unwrap()
}

/// Add an element with level tags
#[allow(dead_code)]
pub fn add_element(model: &mut Model, id: &str, element_type: ElementType, levels: &[&str]) {
    let mut element = Element::new(id, element_type, id.to_uppercase());
    for level in levels {
        element = element.with_level(*level);
    }
    model.insert_element(element);
}

/// Add a relationship between existing elements
#[allow(dead_code)]
pub fn add_relationship(
    model: &mut Model,
    id: &str,
    relationship_type: RelationshipType,
    source: &str,
    target: &str,
) {
    model
        .insert_relationship(Relationship::new(id, relationship_type, source, target))
        .unwrap();
}

/// A two-level model: functions composed into a parent, with access and
/// serving at level 1 and access at level 0
#[allow(dead_code)]
pub fn layered_model() -> Model {
    let mut model = Model::new();
    add_element(&mut model, "f0", ElementType::BusinessFunction, &["0"]);
    add_element(&mut model, "f1", ElementType::BusinessFunction, &["1"]);
    add_element(&mut model, "f2", ElementType::BusinessFunction, &["1"]);
    add_element(&mut model, "o0", ElementType::BusinessObject, &["0"]);
    add_element(&mut model, "o1", ElementType::BusinessObject, &["1"]);

    add_relationship(&mut model, "c1", RelationshipType::Composition, "f0", "f1");
    add_relationship(&mut model, "c2", RelationshipType::Composition, "f0", "f2");
    add_relationship(&mut model, "a0", RelationshipType::Access, "f0", "o0");
    add_relationship(&mut model, "a1", RelationshipType::Access, "f1", "o1");
    add_relationship(&mut model, "a2", RelationshipType::Access, "f2", "o1");
    add_relationship(&mut model, "s1", RelationshipType::Serving, "f1", "f2");
    model
}

/// Configuration writing into `dir/output`
#[allow(dead_code)]
pub fn config_in(dir: &Path) -> CapValConfig {
    CapValConfig {
        output_dir: dir.join("output"),
        ..CapValConfig::default()
    }
}

/// Write an executable shell script standing in for the checker
#[cfg(unix)]
#[allow(dead_code)]
pub fn fake_checker(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-checker.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
