//! Test utilities for building temporary script trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a script tree and its generated docs.
///
/// Scripts live under `<tmp>/<name>/`, so the tree has a stable title.
/// Everything is removed when dropped.
pub struct TestTree {
    dir: TempDir,
    name: String,
}

impl TestTree {
    /// Create an empty tree named `scripts`.
    pub fn new() -> Self {
        Self::named("scripts")
    }

    /// Create an empty tree with the given directory name.
    pub fn named(name: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join(name)).expect("Failed to create source dir");
        Self {
            dir,
            name: name.to_string(),
        }
    }

    /// The temporary directory containing the tree.
    pub fn base(&self) -> &Path {
        self.dir.path()
    }

    /// Root of the script tree.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join(&self.name)
    }

    /// Default output directory, next to the script tree.
    pub fn docs(&self) -> PathBuf {
        self.dir.path().join("docs")
    }

    /// Add a script under the tree root.
    ///
    /// Creates parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Read a generated page relative to the output directory.
    pub fn read_page(&self, page: &str) -> String {
        fs::read_to_string(self.docs().join(page))
            .unwrap_or_else(|e| panic!("Failed to read page {}: {}", page, e))
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
