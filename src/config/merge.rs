// src/config/merge.rs

//! Default configuration per project type and the deep merge used to lay
//! user overrides on top of it.

use serde_json::{Value, json};

use crate::types::ProjectType;

/// Recursively merge `source` into `target`.
///
/// Object-valued keys present on both sides are merged key by key; any
/// other value in `source` overwrites the one in `target`. Keys only present
/// in `target` are kept. Merging the same `source` twice leaves `target`
/// unchanged the second time.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, src_val) in src {
                match dst.get_mut(key) {
                    Some(dst_val) if dst_val.is_object() && src_val.is_object() => {
                        deep_merge(dst_val, src_val);
                    }
                    _ => {
                        dst.insert(key.clone(), src_val.clone());
                    }
                }
            }
        }
        (target, source) => {
            *target = source.clone();
        }
    }
}

/// Built-in defaults for a project type.
///
/// Only the paths that matter for the type are listed; `dist`, `package`,
/// `test` and `types` are shared by all types.
pub fn default_config(project_type: ProjectType) -> Value {
    let paths = match project_type {
        ProjectType::Generic => json!({
            "dist": ".dist",
            "package": ".package",
            "src": "src",
            "test": "test",
            "types": "types",
        }),
        ProjectType::DesktopShell => json!({
            "dist": ".dist",
            "package": ".package",
            "src_main": "src.main",
            "src_render": "src.render",
            "test": "test",
            "types": "types",
        }),
        ProjectType::WebClientServer => json!({
            "dist": ".dist",
            "package": ".package",
            "src_client": "src.client",
            "src_server": "src.server",
            "test": "test",
            "types": "types",
        }),
    };

    json!({
        "type": project_type.as_str(),
        "paths": paths,
        "lint": { "severity": "error", "formatter": "verbose" },
        "external_config": { "enabled": false },
    })
}

/// Read the declared project type out of an unmerged user config, so the
/// matching defaults can be picked before merging.
pub fn declared_type(user: &Value) -> Result<ProjectType, String> {
    match user.get("type") {
        None | Some(Value::Null) => Ok(ProjectType::Generic),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(format!("\"type\" must be a string, got {other}")),
    }
}

/// Defaults for the user's declared type with the user's config merged on top.
pub fn merged_with_defaults(user: Option<&Value>) -> Result<Value, String> {
    let project_type = match user {
        Some(u) => declared_type(u)?,
        None => ProjectType::Generic,
    };
    let mut merged = default_config(project_type);
    if let Some(u) = user {
        if !u.is_object() {
            return Err("config root must be a JSON object".to_string());
        }
        deep_merge(&mut merged, u);
    }
    Ok(merged)
}
