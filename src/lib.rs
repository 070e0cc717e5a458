//! scriptdoc - Sphinx pages for trees of R, MATLAB, Stata, Julia and Python scripts

pub mod error;
pub mod file_utils;
pub mod header;
pub mod language;
pub mod output;
pub mod rules;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use file_utils::SourceFile;
pub use header::{Header, HeaderKind, dedent, extract_file_header, extract_header, find_header};
pub use language::{Language, resolve};
pub use output::{WriteSummary, print_json, write_tree};
pub use rules::{LineRule, RuleSet};
pub use tree::{DocConfig, DocNode, DocWalker};
