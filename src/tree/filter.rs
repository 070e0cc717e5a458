//! `.gitignore` filtering for the walker

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::warn;

/// Matcher for the `.gitignore` at the root of the documented tree.
pub struct GitignoreFilter {
    matcher: Gitignore,
}

impl GitignoreFilter {
    /// Load `<root>/.gitignore`. Returns `None` when there is no such file
    /// or it cannot be parsed at all.
    pub fn new(root: &Path) -> Option<Self> {
        let gitignore = root.join(".gitignore");
        if !gitignore.is_file() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&gitignore) {
            warn!("partially invalid {}: {}", gitignore.display(), err);
        }
        match builder.build() {
            Ok(matcher) => Some(Self { matcher }),
            Err(err) => {
                warn!("ignoring {}: {}", gitignore.display(), err);
                None
            }
        }
    }

    /// Check if a path under the root is ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.matcher.matched(path, is_dir).is_ignore()
    }
}
