//! Loading configuration files from disk.

use std::fs;

use tempfile::TempDir;
use termstruct_config::prelude::*;
use termstruct_curves::DateErrorPolicy;
use termstruct_math::solvers::SolverKind;

#[test]
fn test_load_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analysis.toml");
    fs::write(
        &path,
        r#"
date_column = "Date"
instruments = ["CAN 2.25 Mar 24", "CAN 1.5 Sep 24", "CAN 1.25 Mar 25"]
on_date_error = "skip"

[solver]
kind = "newton"
max_iterations = 50
"#,
    )
    .unwrap();

    let config = AnalysisConfig::load(&path).unwrap();
    assert_eq!(config.date_column, "Date");
    assert_eq!(config.instruments.len(), 3);
    assert_eq!(config.on_date_error, DateErrorPolicy::Skip);
    assert_eq!(config.solver.kind, SolverKind::Newton);
    assert_eq!(config.solver.max_iterations, 50);
}

#[test]
fn test_load_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analysis.json");
    fs::write(&path, r#"{"pillars": [0.5, 1.0, 2.0], "basket_ordering": "strict"}"#).unwrap();

    let config = AnalysisConfig::load(&path).unwrap();
    assert_eq!(config.pillars, vec![0.5, 1.0, 2.0]);
    assert_eq!(config.to_bootstrap_config().unwrap().pillars.len(), 3);
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "pillars = [1.0]\n[solver]\ntolerance = 0.5\n").unwrap();

    let err = AnalysisConfig::load(&path).unwrap_err();
    match err {
        ConfigError::MultipleValidationErrors(errors) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["pillars", "solver.tolerance"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = AnalysisConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config = AnalysisConfig::new()
        .with_pillars(vec![1.0, 2.0, 5.0, 10.0])
        .with_instruments(["CAN 2.75 Sep 27", "CAN 3.5 Mar 28"]);

    for name in ["saved.toml", "saved.json"] {
        let path = dir.path().join(name);
        config.save(&path).unwrap();
        assert_eq!(AnalysisConfig::load(&path).unwrap(), config);
    }
}
