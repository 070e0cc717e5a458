//! Error types shared by the extraction engine and the page generator

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while classifying, reading or documenting source files.
#[derive(Error, Debug)]
pub enum Error {
    /// No registered language pattern matches the file name.
    #[error("cannot determine file type of '{}': unknown extension", path.display())]
    UnknownFileType { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is {size} bytes, over the {limit} byte limit", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("invalid comment pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Block and line-run patterns must expose their body through a `comment` group.
    #[error("comment pattern `{pattern}` has no `comment` capture group")]
    MissingCommentGroup { pattern: String },

    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// Cleaning would remove the documented sources or something inside them.
    #[error(
        "refusing to clean '{}': it overlaps the source tree '{}'",
        path.display(),
        root.display()
    )]
    UnsafeClean { path: PathBuf, root: PathBuf },
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether a per-file error should skip that file instead of aborting the run.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Error::UnknownFileType { .. } | Error::Io { .. } | Error::FileTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
