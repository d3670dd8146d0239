// src/catalog/mod.rs

//! The declarative task catalog.
//!
//! - [`target`] holds the typed target identifiers, leaf actions and rules.
//! - [`rules`] is the single rule table deciding which targets exist for a
//!   project and how they depend on one another.

pub mod rules;
pub mod target;

pub use rules::rules_for;
pub use target::{Action, Rule, TargetId, TaskName};

/// Target run when no target is requested.
pub const DEFAULT_TARGET: &str = "default";

/// Requesting any of these makes cleaning part of the run.
pub const CLEAN_IMPLYING_TARGETS: [&str; 3] = ["clean", "publish", DEFAULT_TARGET];

/// Ordered list of requested target names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    targets: Vec<TaskName>,
}

impl RunRequest {
    /// An empty list becomes the single implicit `default` target.
    pub fn new(targets: Vec<TaskName>) -> Self {
        let targets = if targets.is_empty() {
            vec![DEFAULT_TARGET.to_string()]
        } else {
            targets
        };
        Self { targets }
    }

    pub fn targets(&self) -> &[TaskName] {
        &self.targets
    }

    /// Whether this run cleans before building `dist`.
    pub fn implies_clean(&self) -> bool {
        self.targets
            .iter()
            .any(|t| CLEAN_IMPLYING_TARGETS.contains(&t.as_str()))
    }
}

impl<S: Into<String>> FromIterator<S> for RunRequest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RunRequest::new(iter.into_iter().map(Into::into).collect())
    }
}
