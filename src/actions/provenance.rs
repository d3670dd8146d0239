// src/actions/provenance.rs

//! Build provenance: which CI system produced a dist, and how that shows up
//! in the package metadata and the archive names.

use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::actions::BuildEnv;
use crate::errors::ActionError;

/// Where the build ran, as detected from environment markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// `JENKINS_URL` is defined.
    Jenkins {
        build_id: Option<String>,
        build_url: Option<String>,
        svn_url: Option<String>,
        svn_revision: Option<String>,
    },
    /// `CI=true` and `CI_SERVER_NAME=GitLab`.
    GitLab {
        pipeline_id: Option<String>,
        pipeline_url: Option<String>,
        tag: Option<String>,
        branch: Option<String>,
        commit: Option<String>,
    },
    /// No CI markers: a developer build, stamped with the local time.
    Local { timestamp: String },
}

impl Provenance {
    pub fn detect(env: &BuildEnv, now: DateTime<Local>) -> Self {
        let var = |k: &str| env.get(k).map(str::to_string);

        if env.contains("JENKINS_URL") {
            Provenance::Jenkins {
                build_id: var("BUILD_ID"),
                build_url: var("BUILD_URL"),
                svn_url: var("SVN_URL"),
                svn_revision: var("SVN_REVISION"),
            }
        } else if env.get("CI") == Some("true") && env.get("CI_SERVER_NAME") == Some("GitLab") {
            let tag = var("CI_COMMIT_TAG");
            Provenance::GitLab {
                pipeline_id: var("CI_PIPELINE_ID"),
                pipeline_url: var("CI_PIPELINE_URL"),
                branch: if tag.is_none() { var("CI_COMMIT_REF_SLUG") } else { None },
                tag,
                commit: var("CI_COMMIT_SHA"),
            }
        } else {
            Provenance::Local {
                timestamp: now.format("%Y%m%d%H%M%S").to_string(),
            }
        }
    }

    /// Record provenance into package metadata.
    ///
    /// Fails when a GitLab tag build's tag differs from the package version.
    pub fn apply(&self, pkg: &mut Map<String, Value>) -> Result<(), ActionError> {
        match self {
            Provenance::Jenkins {
                build_id,
                build_url,
                svn_url,
                svn_revision,
            } => {
                let mut build = Map::new();
                build.insert("system".into(), "jenkins".into());
                if let Some(id) = build_id {
                    build.insert("id".into(), numeric_or_string(id));
                }
                if let Some(url) = build_url {
                    build.insert("url".into(), url.clone().into());
                }
                merge_object(pkg, "build", build);

                let mut svn = Map::new();
                if let Some(url) = svn_url {
                    svn.insert("url".into(), url.clone().into());
                }
                if let Some(rev) = svn_revision {
                    svn.insert("revision".into(), numeric_or_string(rev));
                }
                if !svn.is_empty() {
                    merge_object(pkg, "subversion", svn);
                }
            }
            Provenance::GitLab {
                pipeline_id,
                pipeline_url,
                tag,
                branch,
                commit,
            } => {
                let version = package_version(pkg).unwrap_or_default().to_string();
                let mut build = Map::new();
                build.insert("system".into(), "gitlab".into());
                if let Some(id) = pipeline_id {
                    build.insert("id".into(), numeric_or_string(id));
                }
                if let Some(url) = pipeline_url {
                    build.insert("url".into(), url.clone().into());
                }
                if let Some(tag) = tag {
                    build.insert("isTag".into(), true.into());
                    if *tag != version {
                        return Err(ActionError::ProvenanceMismatch {
                            tag: tag.clone(),
                            version,
                        });
                    }
                } else if let Some(branch) = branch {
                    build.insert("branch".into(), branch.clone().into());
                }
                if let Some(sha) = commit {
                    build.insert("commit".into(), sha.clone().into());
                }
                merge_object(pkg, "build", build);
            }
            Provenance::Local { timestamp } => {
                let version = format!("{}-dev{timestamp}", package_version(pkg).unwrap_or_default());
                warn!(version = %version, "not running under CI; using a development version");
                pkg.insert("version".into(), version.into());
            }
        }
        Ok(())
    }
}

/// Version string embedded in archive names, read back from the written
/// dist metadata:
///
/// - jenkins: `<version>-r<revision>-b<build id>`
/// - gitlab, not a tag: `<version>-b<pipeline id>-<branch>-<commit[..8]>`
/// - otherwise the plain version
///
/// Missing parts are left out.
pub fn archive_version(pkg: &Value) -> String {
    let mut out = pkg.get("version").and_then(Value::as_str).unwrap_or_default().to_string();
    let build = pkg.get("build");
    let field = |v: Option<&Value>, key: &str| v.and_then(|b| b.get(key)).and_then(scalar_string);

    match build.and_then(|b| b.get("system")).and_then(Value::as_str) {
        Some("jenkins") => {
            if let Some(rev) = field(pkg.get("subversion"), "revision") {
                out.push_str(&format!("-r{rev}"));
            }
            if let Some(id) = field(build, "id") {
                out.push_str(&format!("-b{id}"));
            }
        }
        Some("gitlab") => {
            let is_tag = build.and_then(|b| b.get("isTag")).and_then(Value::as_bool).unwrap_or(false);
            if !is_tag {
                if let Some(id) = field(build, "id") {
                    out.push_str(&format!("-b{id}"));
                }
                if let Some(branch) = field(build, "branch") {
                    out.push_str(&format!("-{branch}"));
                }
                if let Some(sha) = build.and_then(|b| b.get("commit")).and_then(Value::as_str) {
                    let short: String = sha.chars().take(8).collect();
                    out.push_str(&format!("-{short}"));
                }
            }
        }
        _ => {}
    }
    out
}

/// Archive base name: package name without its scope marker, the scope
/// separator turned into `-` (`@acme/tool` -> `acme-tool`).
pub fn archive_package_name(pkg: &Value) -> Option<String> {
    let name = pkg.get("name").and_then(Value::as_str)?;
    Some(name.replacen('@', "", 1).replacen('/', "-", 1))
}

/// Log the provenance decision once per dist.
pub fn log_detected(p: &Provenance) {
    match p {
        Provenance::Jenkins { .. } => info!(system = "jenkins", "build provenance detected"),
        Provenance::GitLab { tag, .. } => {
            info!(system = "gitlab", tag = tag.as_deref().unwrap_or(""), "build provenance detected")
        }
        Provenance::Local { .. } => info!("no CI environment detected"),
    }
}

fn package_version(pkg: &Map<String, Value>) -> Option<&str> {
    pkg.get("version").and_then(Value::as_str)
}

/// Merge `fields` into the object stored under `key`, replacing any
/// non-object value.
fn merge_object(pkg: &mut Map<String, Value>, key: &str, fields: Map<String, Value>) {
    match pkg.get_mut(key) {
        Some(Value::Object(existing)) => existing.extend(fields),
        _ => {
            pkg.insert(key.to_string(), Value::Object(fields));
        }
    }
}

fn numeric_or_string(raw: &str) -> Value {
    raw.parse::<i64>().map(Value::from).unwrap_or_else(|_| Value::from(raw))
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
