// tests/config.rs

mod common;

use std::error::Error;
use std::fs;

use serde_json::json;
use shapebuild::config::{deep_merge, default_config, from_value, load_and_validate, load_from_path};
use shapebuild::errors::BuildError;
use shapebuild::types::{LintSeverity, ProjectType};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn deep_merge_overrides_leaves_and_keeps_siblings() {
    let mut target = json!({ "paths": { "src": "src", "test": "test" }, "jobs": 2 });
    deep_merge(&mut target, &json!({ "paths": { "src": "a" } }));

    assert_eq!(target, json!({ "paths": { "src": "a", "test": "test" }, "jobs": 2 }));
}

#[test]
fn deep_merge_is_idempotent() {
    let source = json!({ "paths": { "src": "lib" }, "lint": { "severity": "warning" } });
    let mut once = default_config(ProjectType::Generic);
    deep_merge(&mut once, &source);
    let mut twice = once.clone();
    deep_merge(&mut twice, &source);

    assert_eq!(once, twice);
}

#[test]
fn deep_merge_replaces_non_objects_wholesale() {
    let mut target = json!({ "paths": { "src": "src" } });
    deep_merge(&mut target, &json!({ "paths": "flat" }));
    assert_eq!(target, json!({ "paths": "flat" }));
}

#[test]
fn no_user_config_gives_generic_defaults() -> TestResult {
    let config = from_value(None)?;

    assert_eq!(config.project_type, ProjectType::Generic);
    assert_eq!(config.paths.src, "src");
    assert_eq!(config.paths.dist, ".dist");
    assert_eq!(config.paths.package, ".package");
    assert_eq!(config.lint.severity, LintSeverity::Error);
    assert_eq!(config.tools.compiler, "tsc");
    assert!(!config.external_config.enabled);
    assert_eq!(config.jobs, None);
    Ok(())
}

#[test]
fn user_overrides_merge_onto_type_defaults() -> TestResult {
    let config = from_value(Some(&json!({
        "type": "desktop-shell",
        "paths": { "src_main": "app/main" },
        "lint": { "severity": "warning" },
        "tools": { "bundler": "rspack" },
        "jobs": 3,
    })))?;

    assert_eq!(config.project_type, ProjectType::DesktopShell);
    assert_eq!(config.paths.src_main, "app/main");
    assert_eq!(config.paths.src_render, "src.render");
    assert_eq!(config.lint.severity, LintSeverity::Warning);
    assert_eq!(config.lint.formatter, "verbose");
    assert_eq!(config.tools.bundler, "rspack");
    assert_eq!(config.tools.linter, "tslint");
    assert_eq!(config.jobs, Some(3));
    Ok(())
}

#[test]
fn legacy_type_aliases_are_accepted() -> TestResult {
    assert_eq!(from_value(Some(&json!({ "type": "electron" })))?.project_type, ProjectType::DesktopShell);
    assert_eq!(from_value(Some(&json!({ "type": "webapp" })))?.project_type, ProjectType::WebClientServer);
    assert_eq!(from_value(Some(&json!({ "type": "default" })))?.project_type, ProjectType::Generic);
    Ok(())
}

fn config_error(value: serde_json::Value) -> String {
    match from_value(Some(&value)) {
        Err(BuildError::Config(msg)) => msg,
        other => panic!("expected a config error, got {other:?}"),
    }
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(config_error(json!({ "type": "mobile" })).contains("invalid project type"));
    assert!(config_error(json!({ "type": 3 })).contains("must be a string"));
    assert!(config_error(json!([1, 2])).contains("JSON object"));
    assert!(config_error(json!({ "jobs": 0 })).contains("jobs"));
    assert!(config_error(json!({ "paths": { "src": "" } })).contains("paths.src"));
    assert!(config_error(json!({ "paths": { "test": "/abs" } })).contains("relative"));
    assert!(config_error(json!({ "paths": { "types": "../up" } })).contains("must not leave"));
    assert!(config_error(json!({ "paths": { "dist": "src" } })).contains("must differ"));
    assert!(config_error(json!({ "tools": { "compiler": " " } })).contains("tools.compiler"));
    assert!(config_error(json!({ "lint": { "severity": "fatal" } })).contains("invalid config"));
}

#[test]
fn missing_file_falls_back_to_defaults() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("shapebuild.json");

    assert!(load_from_path(&path)?.is_none());
    let config = load_and_validate(&path)?;
    assert_eq!(config.project_type, ProjectType::Generic);
    Ok(())
}

#[test]
fn config_file_is_loaded_and_validated() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("shapebuild.json");
    fs::write(
        &path,
        r#"{ "type": "web-client-server", "paths": { "src_server": "server" } }"#,
    )?;

    let config = load_and_validate(&path)?;
    assert_eq!(config.project_type, ProjectType::WebClientServer);
    assert_eq!(config.paths.src_server, "server");
    assert_eq!(config.paths.src_client, "src.client");
    Ok(())
}

#[test]
fn malformed_file_is_a_config_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("shapebuild.json");
    fs::write(&path, "{ not json")?;

    assert!(matches!(load_and_validate(&path), Err(BuildError::Config(_))));
    Ok(())
}
