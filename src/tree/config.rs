//! Configuration types for the documentation walker

use std::path::PathBuf;

const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Configuration for walking a script tree and writing its pages.
#[derive(Debug, Clone)]
pub struct DocConfig {
    /// Include hidden entries and entries ignored by `.gitignore`
    pub show_all: bool,
    pub max_depth: Option<usize>,
    /// Glob patterns matched against entry names
    pub ignore_patterns: Vec<String>,
    /// Directories skipped entirely, compared after canonicalization
    pub exclude_dirs: Vec<PathBuf>,
    /// Where pages are written; always excluded from the walk
    pub output_dir: PathBuf,
    /// Title of the root index page (defaults to the source directory name)
    pub title: Option<String>,
    /// Root that Python module paths are computed from
    /// (defaults to the parent of the source directory)
    pub package_root: Option<PathBuf>,
    /// Number of parallel workers for header extraction.
    /// 0 = auto-detect (use all available cores)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
    /// Remove previously generated pages for this title before writing
    pub clean: bool,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            show_all: false,
            max_depth: None,
            ignore_patterns: Vec::new(),
            exclude_dirs: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            title: None,
            package_root: None,
            parallel_workers: 0,
            clean: false,
        }
    }
}
