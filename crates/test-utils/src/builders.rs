#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use shapebuild::config::{ProjectConfig, from_value};
use shapebuild::types::ProjectType;
use tempfile::TempDir;

/// Builder for `ProjectConfig` to simplify test setup.
///
/// Produces the same JSON a user would write and runs it through the real
/// merge and validation, so defaults apply exactly as in production.
pub struct ProjectConfigBuilder {
    config: Map<String, Value>,
}

impl ProjectConfigBuilder {
    pub fn new(project_type: ProjectType) -> Self {
        let mut config = Map::new();
        config.insert("type".into(), project_type.as_str().into());
        Self { config }
    }

    pub fn path(mut self, key: &str, dir: &str) -> Self {
        self.section("paths").insert(key.into(), dir.into());
        self
    }

    pub fn tool(mut self, key: &str, command: &str) -> Self {
        self.section("tools").insert(key.into(), command.into());
        self
    }

    pub fn lint_severity(mut self, severity: &str) -> Self {
        self.section("lint").insert("severity".into(), severity.into());
        self
    }

    pub fn external_config(mut self, dir: &str) -> Self {
        let section = self.section("external_config");
        section.insert("enabled".into(), true.into());
        section.insert("dir".into(), dir.into());
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.insert("jobs".into(), json!(jobs));
        self
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.config.clone())
    }

    pub fn build(self) -> ProjectConfig {
        from_value(Some(&self.to_value())).expect("Failed to build valid config from builder")
    }

    fn section(&mut self, key: &str) -> &mut Map<String, Value> {
        let slot = self
            .config
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        slot.as_object_mut().expect("config section is an object")
    }
}

impl Default for ProjectConfigBuilder {
    fn default() -> Self {
        Self::new(ProjectType::Generic)
    }
}

/// A project directory on disk, removed when dropped.
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("creating temp project dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.join(rel)).expect("creating dir");
        self
    }

    pub fn file(self, rel: &str, content: &str) -> Self {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dir");
        }
        fs::write(path, content).expect("writing file");
        self
    }

    pub fn package_json(self, value: Value) -> Self {
        let text = serde_json::to_string_pretty(&value).expect("serializing package.json");
        self.file("package.json", &text)
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.join(rel)).expect("reading file")
    }

    pub fn read_json(&self, rel: &str) -> Value {
        serde_json::from_str(&self.read(rel)).expect("parsing json")
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}
