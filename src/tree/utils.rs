//! Shared utility functions for tree walking

use std::path::{Path, PathBuf};

use glob::Pattern;

/// Check if a path should be ignored based on its name and the ignore patterns.
pub fn should_ignore_path(path: &Path, ignore_patterns: &[String], show_all: bool) -> bool {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    // Always ignore .git directory
    if name == ".git" {
        return true;
    }

    if !show_all && name.starts_with('.') {
        return true;
    }

    ignore_patterns
        .iter()
        .any(|pattern| name == *pattern || glob_match(pattern, &name))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// Check if `path` is one of the excluded directories.
///
/// `excluded` must already be canonical.
pub fn is_excluded_dir(path: &Path, excluded: &[PathBuf]) -> bool {
    if excluded.is_empty() {
        return false;
    }
    path.canonicalize()
        .map(|canonical| excluded.iter().any(|dir| *dir == canonical))
        .unwrap_or(false)
}

/// Page file stem for a script: `clean.do` becomes `clean_do`, so scripts
/// that share a stem in different languages get distinct pages.
pub fn page_stem(file_name: &str) -> String {
    let path = Path::new(file_name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            format!("{}_{}", stem.to_string_lossy(), ext.to_string_lossy())
        }
        _ => file_name.to_string(),
    }
}
