// src/actions/env.rs

use std::collections::BTreeMap;

use crate::types::BuildMode;

/// Variable selecting production vs. development builds.
pub const BUILD_TARGET_VAR: &str = "BUILD_TARGET";
/// Site selector for the external project configuration.
pub const SITE_VAR: &str = "SITE";

/// Snapshot of the environment variables the actions consult.
///
/// Taken once at startup so every node of a run sees the same values, and
/// so tests can inject variables without touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
    vars: BTreeMap<String, String>,
}

impl BuildEnv {
    /// Capture the current process environment. Variables that are not
    /// valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Value of `key`; empty values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Whether `key` is defined at all, even if empty.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn build_mode(&self) -> BuildMode {
        BuildMode::from_build_target(self.get(BUILD_TARGET_VAR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_count_as_unset() {
        let env = BuildEnv::from_pairs([("BUILD_TARGET", ""), ("SITE", "prod")]);
        assert_eq!(env.get(BUILD_TARGET_VAR), None);
        assert!(env.contains(BUILD_TARGET_VAR));
        assert_eq!(env.get(SITE_VAR), Some("prod"));
        assert_eq!(env.build_mode(), BuildMode::Production);
    }

    #[test]
    fn any_other_build_target_is_development() {
        let env = BuildEnv::from_pairs([("BUILD_TARGET", "dev")]);
        assert_eq!(env.build_mode(), BuildMode::Development);
        let env = BuildEnv::from_pairs([("BUILD_TARGET", "production")]);
        assert_eq!(env.build_mode(), BuildMode::Production);
    }
}
