// src/fs/mod.rs

//! Filesystem access.
//!
//! Layout resolution only asks two questions of the tree (is this a
//! directory, which directories sit below it), so it goes through the
//! [`FileSystem`] probe and runs against [`mock::MockFileSystem`] in tests.
//! Actions that copy or delete files walk the real disk via [`walk`].

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;
pub mod walk;

pub use walk::{FileMatcher, matching_files};

/// Read-only directory probe used while resolving the layout.
pub trait FileSystem: Send + Sync + Debug {
    fn is_dir(&self, path: &Path) -> bool;

    /// Directories directly below `path`, as full paths, sorted. Files are
    /// left out.
    fn subdirs(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Probe backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn subdirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("listing {}", path.display()))? {
            let entry = entry.with_context(|| format!("listing {}", path.display()))?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}
