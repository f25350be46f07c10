use std::collections::BTreeSet;

use crate::catalog::{Catalog, TermEncoding};
use crate::errors::{CapValError, Result};
use crate::selection::SelectedRuleSet;

use super::text::quote;

/// Context name of the generated rules file
pub const RULES_CONTEXT: &str = "Rules";

const CLASSIFY: [&str; 5] = [
    "CLASSIFY BusinessFunction ISA Element",
    "CLASSIFY BusinessObject ISA Element",
    "CLASSIFY BusinessProcess ISA Element",
    "CLASSIFY Element ISA Concept",
    "CLASSIFY Concept ISA ArchiObject",
];

const COMMON_DECLARATIONS: [&str; 8] = [
    "RELATION access[BusinessFunction*BusinessObject]",
    "RELATION aggregation[BusinessFunction*BusinessProcess]",
    "RELATION composition[BusinessFunction]",
    "RELATION composition[BusinessObject]",
    "RELATION composition[BusinessProcess]",
    "RELATION composition[Element]",
    "RELATION serving[BusinessFunction]",
    "RELATION name[ArchiObject*Text] [UNI]",
];

/// Assemble a complete rules file
///
/// With a selection, the selected bodies are emitted in selection order;
/// without one, the universal body of every family in catalog order. The
/// file `INCLUDE`s `include`, which is the generated population or a foreign
/// export depending on the encoding.
///
/// # Errors
///
/// Returns `Internal` if a selected instance has no body in the catalog.
pub fn render_rules(
    encoding: &dyn TermEncoding,
    include: &str,
    selection: Option<&SelectedRuleSet>,
) -> Result<String> {
    let catalog = Catalog::build(encoding);

    let mut lines: Vec<String> = vec![
        format!("CONTEXT {}", RULES_CONTEXT),
        String::new(),
        format!("INCLUDE {}", quote(include)),
        String::new(),
    ];
    lines.extend(CLASSIFY.iter().map(|s| s.to_string()));
    lines.push(String::new());
    lines.extend(COMMON_DECLARATIONS.iter().map(|s| s.to_string()));
    lines.extend(encoding.declarations());
    lines.push(String::new());

    let mut emitted = BTreeSet::new();
    match selection {
        Some(selection) => {
            for instance in selection {
                let body = catalog.get(instance).ok_or_else(|| CapValError::Internal {
                    message: format!("no rule body for {}", instance),
                })?;
                if emitted.insert(body.instance) {
                    lines.push(body.to_string());
                }
            }
        }
        None => {
            for body in catalog.universal() {
                if emitted.insert(body.instance) {
                    lines.push(body.to_string());
                }
            }
        }
    }

    tracing::debug!(
        encoding = catalog.encoding(),
        bodies = emitted.len(),
        "rules assembled"
    );

    lines.push("ENDCONTEXT".to_string());
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DirectRelations, Family, PropertyTriples, RuleInstance};
    use crate::model::Level;

    #[test]
    fn test_header_for_direct_encoding() {
        let output = render_rules(&DirectRelations, "model.adl", None).unwrap();

        assert!(output.starts_with("CONTEXT Rules\n\nINCLUDE \"model.adl\"\n\nCLASSIFY BusinessFunction ISA Element\n"));
        assert!(output.contains("RELATION name[ArchiObject*Text] [UNI]\nRELATION association[BusinessObject]\nRELATION level[Element*Level]\n"));
        assert!(!output.contains("propOf"));
        assert!(output.ends_with("ENDCONTEXT"));
    }

    #[test]
    fn test_standalone_header_includes_foreign_export() {
        let output = render_rules(&PropertyTriples, "model.archimate", None).unwrap();

        assert!(output.contains("INCLUDE \"model.archimate\""));
        assert!(output.contains("RELATION value[Property*Text] [UNI]"));
        assert!(!output.contains("RELATION level[Element*Level]"));
    }

    #[test]
    fn test_full_mode_emits_universal_bodies_only() {
        let output = render_rules(&DirectRelations, "model.adl", None).unwrap();

        assert!(output.contains("RULE C13_connected_graph:"));
        assert!(output.contains("RULE C4_association_inherited_upward:"));
        assert!(!output.contains("RULE C6_function_must_access_object_L0:"));
        assert_eq!(output.matches("RULE C6_function_must_access_object:").count(), 1);
    }

    #[test]
    fn test_selection_order_is_kept() {
        let mut selection = SelectedRuleSet::new();
        selection.push(RuleInstance::universal(Family::C0));
        selection.push(RuleInstance::at_level(Family::C11, Level::ALL[0]));

        let output = render_rules(&DirectRelations, "model.adl", Some(&selection)).unwrap();

        let c0 = output.find("RULE C0_supported_level_assigned:").unwrap();
        let c11 = output.find("RULE C11_shared_object_L0:").unwrap();
        assert!(c0 < c11);
        assert!(!output.contains("RULE C1_one_parent:"));
    }

    #[test]
    fn test_unknown_instance_is_internal_error() {
        let mut selection = SelectedRuleSet::new();
        selection.push(RuleInstance::at_level(Family::C1, Level::ALL[0]));

        let err = render_rules(&DirectRelations, "model.adl", Some(&selection)).unwrap_err();
        assert!(matches!(err, CapValError::Internal { .. }));
    }

    #[test]
    fn test_include_path_is_escaped() {
        let output = render_rules(&PropertyTriples, r#"C:\exports\"q3".archimate"#, None).unwrap();
        assert!(output.contains(r#"INCLUDE "C:\\exports\\\"q3\".archimate""#));
    }
}
