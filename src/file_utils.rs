//! Source file reading
//!
//! Reads scripts with a size limit and pairs them with their resolved
//! language.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::header::extract_header;
use crate::language::{Language, resolve};

/// Default maximum file size for header extraction (1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// Global configurable max file size. Set via `set_max_file_size()`.
static MAX_FILE_SIZE: AtomicU64 = AtomicU64::new(DEFAULT_MAX_FILE_SIZE);

/// Set the maximum file size for extraction operations.
/// This affects all subsequent calls to `read_text` and `SourceFile::read`.
pub fn set_max_file_size(size: u64) {
    MAX_FILE_SIZE.store(size, Ordering::SeqCst);
}

/// Get the current maximum file size setting.
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE.load(Ordering::SeqCst)
}

/// A script read from disk together with its language.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
    pub text: String,
}

impl SourceFile {
    /// Resolve the language of `path` and read its contents.
    ///
    /// Fails with [`Error::UnknownFileType`] before touching the file when
    /// the name is not recognized.
    pub fn read(path: &Path) -> Result<Self> {
        let language = resolve(path)?;
        let text = read_text(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            language,
            text,
        })
    }

    /// The header comment of this file, empty if it has none.
    pub fn header(&self) -> String {
        extract_header(&self.text, self.language.rules())
    }
}

/// Read a file as UTF-8 if it is within the size limit.
///
/// A leading byte order mark is dropped so it cannot hide a header.
pub fn read_text(path: &Path) -> Result<String> {
    let metadata = path.metadata().map_err(|e| Error::io(path, e))?;
    let limit = get_max_file_size();
    if metadata.len() > limit {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}
