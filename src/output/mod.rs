//! Page rendering and output
//!
//! - `rst` - reStructuredText templates for script, module and index pages
//! - `paths` - include paths, toctree entries and Python module paths
//! - `writer` - writes a page plan to the output directory
//! - `print_json` - dumps the page plan instead of writing it

mod paths;
mod rst;
mod writer;

use std::io;

use crate::tree::DocNode;

pub use paths::{module_path, relative_path, to_posix, toctree_entry};
pub use rst::{render_index_page, render_module_page, render_script_page};
pub use writer::{WriteSummary, render_page, write_tree};

/// Print the page plan as pretty-printed JSON to stdout.
pub fn print_json(node: &DocNode) -> io::Result<()> {
    let json = serde_json::to_string_pretty(node).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
