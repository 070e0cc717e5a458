//! Directory walking
//!
//! `DocWalker` scans a source tree and produces a `DocNode` page plan: one
//! index page per directory that contains scripts, one page per script.

mod config;
mod filter;
mod node;
mod utils;
mod walker;

pub use config::DocConfig;
pub use filter::GitignoreFilter;
pub use node::DocNode;
pub use utils::{glob_match, page_stem};
pub use walker::DocWalker;
