mod common;

use std::fs;

use capval_core::model::document::load_model;
use capval_core::pipeline::{generate, run_standalone, run_validation, ValidationMode};
use capval_core::{CapValConfig, CapValError};
use common::{config_in, layered_model, shared_object_model, SHARED_OBJECT_YAML};
use tempfile::TempDir;

#[test]
fn test_generation_is_deterministic_in_both_modes() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());

    for mode in [ValidationMode::Full, ValidationMode::Partial] {
        let first = generate(mode, &layered_model().full_collection(), &config).unwrap();
        let second = generate(mode, &layered_model().full_collection(), &config).unwrap();

        assert_eq!(first.population.digest, second.population.digest);
        assert_eq!(first.rules.digest, second.rules.digest);
        assert_eq!(first.rules.content, second.rules.content);
    }
}

#[test]
fn test_rewriting_produces_identical_files() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());
    let model = shared_object_model();

    run_validation(ValidationMode::Partial, &model.full_collection(), &config, false, |_| {}).unwrap();
    let before = fs::read(config.output_dir.join("rules.adl")).unwrap();

    run_validation(ValidationMode::Partial, &model.full_collection(), &config, false, |_| {}).unwrap();
    let after = fs::read(config.output_dir.join("rules.adl")).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_loaded_yaml_and_built_model_generate_same_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("model.yaml");
    fs::write(&path, SHARED_OBJECT_YAML).unwrap();

    let loaded = load_model(&path).unwrap();
    let config = config_in(temp.path());

    let a = generate(ValidationMode::Partial, &loaded.full_collection(), &config).unwrap();
    let b = generate(ValidationMode::Partial, &shared_object_model().full_collection(), &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_custom_file_names_are_used() {
    let temp = TempDir::new().unwrap();
    let config = CapValConfig {
        model_file: "population.adl".to_string(),
        rules_file: "checks.adl".to_string(),
        ..config_in(temp.path())
    };

    let report = run_validation(
        ValidationMode::Full,
        &shared_object_model().full_collection(),
        &config,
        false,
        |_| {},
    )
    .unwrap();

    assert_eq!(report.element_count, 3);
    assert_eq!(report.relationship_count, 2);
    let rules = fs::read_to_string(config.output_dir.join("checks.adl")).unwrap();
    assert!(rules.contains("INCLUDE \"population.adl\""));
    assert!(config.output_dir.join("population.adl").exists());
}

#[test]
fn test_unwritable_output_dir_aborts_run() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("output");
    fs::write(&blocker, "a file, not a directory").unwrap();
    let config = config_in(temp.path());

    let err = run_validation(
        ValidationMode::Full,
        &shared_object_model().full_collection(),
        &config,
        true,
        |_| panic!("checker must not run"),
    )
    .unwrap_err();

    assert!(matches!(err, CapValError::WriteFailed { .. }));
}

#[test]
fn test_standalone_uses_property_triples() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());

    let path = run_standalone(&config).unwrap();
    let content = fs::read_to_string(path).unwrap();

    assert!(content.contains("RELATION propOf[Property*ArchiObject] [UNI]"));
    assert!(content.contains("RULE C6_function_must_access_object:"));
    assert!(!content.contains("level[Element*Level]"));
}

#[cfg(unix)]
#[test]
fn test_checker_output_relayed_line_by_line() {
    let temp = TempDir::new().unwrap();
    let checker = common::fake_checker(
        temp.path(),
        "test -f \"$2\" || exit 9\necho 'There is 1 violation of RULE C11_shared_object:' >&2\necho '(Sales, Billing)' >&2\nexit 1",
    );
    let config = CapValConfig {
        checker,
        ..config_in(temp.path())
    };

    let mut relayed = Vec::new();
    let report = run_validation(
        ValidationMode::Partial,
        &shared_object_model().full_collection(),
        &config,
        true,
        |line| relayed.push(line.to_string()),
    )
    .unwrap();

    assert_eq!(
        relayed,
        vec!["There is 1 violation of RULE C11_shared_object:", "(Sales, Billing)"]
    );
    let outcome = report.checker.unwrap();
    assert_eq!(outcome.exit_code, Some(1));
    assert_eq!(outcome.lines, 2);
}
