//! Page plan produced by the walker

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::language::Language;

/// One page to generate: a script page or a directory index.
///
/// `page` paths are relative to the output directory.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocNode {
    File {
        name: String,
        source: PathBuf,
        page: PathBuf,
        language: Language,
        /// Extracted header; absent for Python modules
        #[serde(skip_serializing_if = "Option::is_none")]
        header: Option<String>,
        /// Dotted module path, for Python modules only
        #[serde(skip_serializing_if = "Option::is_none")]
        module: Option<String>,
    },
    Dir {
        name: String,
        source: PathBuf,
        page: PathBuf,
        children: Vec<DocNode>,
    },
}

impl DocNode {
    pub fn name(&self) -> &str {
        match self {
            DocNode::File { name, .. } => name,
            DocNode::Dir { name, .. } => name,
        }
    }

    pub fn page(&self) -> &Path {
        match self {
            DocNode::File { page, .. } => page,
            DocNode::Dir { page, .. } => page,
        }
    }

    /// The script or directory this page documents.
    pub fn source(&self) -> &Path {
        match self {
            DocNode::File { source, .. } => source,
            DocNode::Dir { source, .. } => source,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, DocNode::Dir { .. })
    }

    /// Number of (directory, file) pages in this subtree.
    pub fn count_pages(&self) -> (usize, usize) {
        match self {
            DocNode::File { .. } => (0, 1),
            DocNode::Dir { children, .. } => {
                children
                    .iter()
                    .map(DocNode::count_pages)
                    .fold((1, 0), |(d, f), (cd, cf)| (d + cd, f + cf))
            }
        }
    }
}
