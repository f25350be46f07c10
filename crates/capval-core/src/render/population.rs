use crate::model::{Collection, ElementType, RelationshipType};

use super::text::quote;

/// Context name of the generated population
pub const MODEL_CONTEXT: &str = "Model";

/// Signature of an observed relationship: (type, source type, target type)
type Triple<'m> = (&'m RelationshipType, &'m ElementType, &'m ElementType);

/// Render the population of a collection
///
/// Emits, per element type present, a functional `name` relation and a
/// `level` relation (one tuple per level tag, supported or not), then one
/// relation per observed (relationship type, source type, target type)
/// triple.
///
/// Output is byte-identical for identical input: tuples follow collection
/// order and groups follow first-seen order. Relations with no instance in
/// the collection are never declared.
pub fn render_population(collection: &Collection<'_>) -> String {
    let mut lines: Vec<String> = vec![format!("CONTEXT {}", MODEL_CONTEXT)];

    let element_types = first_seen(collection.elements().iter().map(|e| &e.element_type));

    // Element names
    for element_type in &element_types {
        let concept = element_type.concept_name();
        let tuples: Vec<String> = collection
            .elements()
            .iter()
            .filter(|e| &&e.element_type == element_type)
            .map(|e| tuple(&e.id, &e.name))
            .collect();

        push_block(
            &mut lines,
            &format!("name [{}*Text]", concept),
            Some("[UNI]"),
            &tuples,
        );
    }

    // Element levels
    for element_type in &element_types {
        let concept = element_type.concept_name();
        let tuples: Vec<String> = collection
            .elements()
            .iter()
            .filter(|e| &&e.element_type == element_type)
            .flat_map(|e| e.level_tags().iter().map(move |tag| tuple(&e.id, tag)))
            .collect();

        push_block(
            &mut lines,
            &format!("level [{}*Level]", concept),
            None,
            &tuples,
        );
    }

    // Relationships, grouped by observed signature
    let triples: Vec<Triple<'_>> = first_seen(collection.links().iter().map(|l| {
        (
            &l.relationship.relationship_type,
            &l.source.element_type,
            &l.target.element_type,
        )
    }));

    for (relationship_type, source_type, target_type) in &triples {
        let tuples: Vec<String> = collection
            .links()
            .iter()
            .filter(|l| {
                &&l.relationship.relationship_type == relationship_type
                    && &&l.source.element_type == source_type
                    && &&l.target.element_type == target_type
            })
            .map(|l| tuple(&l.source.id, &l.target.id))
            .collect();

        push_block(
            &mut lines,
            &format!(
                "{} [{}*{}]",
                relationship_type.relation_name(),
                source_type.concept_name(),
                target_type.concept_name()
            ),
            None,
            &tuples,
        );
    }

    lines.push("ENDCONTEXT".to_string());
    lines.join("\n")
}

/// Distinct items in first-seen order
fn first_seen<T: PartialEq>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut distinct = Vec::new();
    for item in items {
        if !distinct.contains(&item) {
            distinct.push(item);
        }
    }
    distinct
}

fn tuple(left: &str, right: &str) -> String {
    format!("    ( {} , {} )", quote(left), quote(right))
}

/// Declaration + population block, followed by a blank line
fn push_block(lines: &mut Vec<String>, relation: &str, property: Option<&str>, tuples: &[String]) {
    match property {
        Some(property) => lines.push(format!("RELATION {} {}", relation, property)),
        None => lines.push(format!("RELATION {}", relation)),
    }
    lines.push(format!("POPULATION {} CONTAINS [", relation));
    lines.push(tuples.join(",\n"));
    lines.push("]\n".to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, Model, Relationship};

    #[test]
    fn test_empty_collection_is_bare_context() {
        let model = Model::new();
        let output = render_population(&model.full_collection());
        assert_eq!(output, "CONTEXT Model\nENDCONTEXT");
    }

    #[test]
    fn test_single_element_blocks() {
        let mut model = Model::new();
        model.insert_element(
            Element::new("bf1", ElementType::BusinessFunction, "Sales").with_level("0"),
        );

        let output = render_population(&model.full_collection());
        let expected = [
            "CONTEXT Model",
            "RELATION name [BusinessFunction*Text] [UNI]",
            "POPULATION name [BusinessFunction*Text] CONTAINS [",
            "    ( \"bf1\" , \"Sales\" )",
            "]",
            "",
            "RELATION level [BusinessFunction*Level]",
            "POPULATION level [BusinessFunction*Level] CONTAINS [",
            "    ( \"bf1\" , \"0\" )",
            "]",
            "",
            "ENDCONTEXT",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_relationship_triples_grouped_in_first_seen_order() {
        let mut model = Model::new();
        model.insert_element(Element::new("bf1", ElementType::BusinessFunction, "F1"));
        model.insert_element(Element::new("bf2", ElementType::BusinessFunction, "F2"));
        model.insert_element(Element::new("bo1", ElementType::BusinessObject, "O1"));
        for (id, kind, s, t) in [
            ("r1", RelationshipType::Serving, "bf1", "bf2"),
            ("r2", RelationshipType::Access, "bf1", "bo1"),
            ("r3", RelationshipType::Serving, "bf2", "bf1"),
        ] {
            model
                .insert_relationship(Relationship::new(id, kind, s, t))
                .unwrap();
        }

        let output = render_population(&model.full_collection());
        let serving = output
            .find("RELATION serving [BusinessFunction*BusinessFunction]")
            .unwrap();
        let access = output
            .find("RELATION access [BusinessFunction*BusinessObject]")
            .unwrap();
        assert!(serving < access);
        assert!(output.contains("    ( \"bf1\" , \"bf2\" ),\n    ( \"bf2\" , \"bf1\" )"));
        assert_eq!(output.matches("RELATION serving").count(), 1);
    }

    #[test]
    fn test_multi_valued_levels_emit_one_tuple_each() {
        let mut model = Model::new();
        model.insert_element(
            Element::new("bp1", ElementType::BusinessProcess, "P")
                .with_level("1")
                .with_level("2"),
        );

        let output = render_population(&model.full_collection());
        assert!(output.contains("    ( \"bp1\" , \"1\" ),\n    ( \"bp1\" , \"2\" )"));
    }
}
