// src/fs/mock.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, bail};

use super::FileSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    File,
    Dir,
}

/// In-memory tree for layout tests. Adding a path creates its ancestors.
///
/// Paths are compared exactly, so tests should use absolute ones
/// (`/proj/src`) and resolve against a matching work dir (`/proj`).
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, Kind>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.lock();
        Self::insert_ancestors(&mut entries, path.as_ref());
    }

    /// Add a file; its content is irrelevant to layout probing.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut entries = self.lock();
        if let Some(parent) = path.parent() {
            Self::insert_ancestors(&mut entries, parent);
        }
        entries.insert(path.to_path_buf(), Kind::File);
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Kind>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn insert_ancestors(entries: &mut BTreeMap<PathBuf, Kind>, path: &Path) {
        for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            entries.entry(ancestor.to_path_buf()).or_insert(Kind::Dir);
        }
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.lock().get(path) == Some(&Kind::Dir)
    }

    fn subdirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let entries = self.lock();
        if entries.get(path) != Some(&Kind::Dir) {
            bail!("not a directory: {}", path.display());
        }
        Ok(entries
            .iter()
            .filter(|(p, kind)| **kind == Kind::Dir && p.parent() == Some(path))
            .map(|(p, _)| p.clone())
            .collect())
    }
}
