//! Writes a page plan to disk

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::tree::DocNode;

use super::paths::{relative_path, to_posix, toctree_entry};
use super::rst::{render_index_page, render_module_page, render_script_page};

/// Counts of pages written by [`write_tree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub dirs: usize,
    pub files: usize,
}

/// Render every page in `root` under `output_dir`.
///
/// With `clean`, the root index page and the directory holding its children
/// are removed first so pages for deleted scripts do not linger.
pub fn write_tree(root: &DocNode, output_dir: &Path, clean: bool) -> Result<WriteSummary> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let output_dir = output_dir
        .canonicalize()
        .map_err(|e| Error::io(output_dir, e))?;

    if clean {
        clean_previous(root, &output_dir)?;
    }

    let mut summary = WriteSummary::default();
    write_node(root, &output_dir, &mut summary)?;
    info!(
        "wrote {} index pages and {} script pages to {}",
        summary.dirs,
        summary.files,
        output_dir.display()
    );
    Ok(summary)
}

/// Render the contents of a single page.
///
/// `page_dir` is the absolute directory the page will live in; script pages
/// include their source relative to it.
pub fn render_page(node: &DocNode, page_dir: &Path) -> String {
    match node {
        DocNode::Dir {
            name,
            page,
            children,
            ..
        } => {
            let entries: Vec<String> = children
                .iter()
                .map(|child| toctree_entry(page, child.page()))
                .collect();
            render_index_page(name, &entries)
        }
        DocNode::File {
            name,
            source,
            module: Some(module),
            ..
        } => {
            debug!("{} documented as module {}", source.display(), module);
            render_module_page(name, module)
        }
        DocNode::File {
            name,
            source,
            header,
            ..
        } => {
            let include = to_posix(&relative_path(page_dir, source));
            render_script_page(name, header.as_deref().unwrap_or(""), &include)
        }
    }
}

fn write_node(node: &DocNode, output_dir: &Path, summary: &mut WriteSummary) -> Result<()> {
    let page_path = output_dir.join(node.page());
    let page_dir = page_path.parent().unwrap_or(output_dir);
    fs::create_dir_all(page_dir).map_err(|e| Error::io(page_dir, e))?;

    let contents = render_page(node, page_dir);
    fs::write(&page_path, contents).map_err(|e| Error::io(&page_path, e))?;
    debug!("wrote {}", page_path.display());

    match node {
        DocNode::Dir { children, .. } => {
            summary.dirs += 1;
            for child in children {
                write_node(child, output_dir, summary)?;
            }
        }
        DocNode::File { .. } => summary.files += 1,
    }
    Ok(())
}

/// Remove the root index page and its child page directory.
///
/// Refuses when that directory is the source root, one of its ancestors or
/// anything inside it, so sources are never deleted.
fn clean_previous(root: &DocNode, output_dir: &Path) -> Result<()> {
    let index = output_dir.join(root.page());
    let children = index.with_extension("");

    let children = if children.is_dir() {
        let target = children
            .canonicalize()
            .map_err(|e| Error::io(&children, e))?;
        let source = root
            .source()
            .canonicalize()
            .unwrap_or_else(|_| root.source().to_path_buf());
        if target.starts_with(&source) || source.starts_with(&target) {
            return Err(Error::UnsafeClean {
                path: target,
                root: source,
            });
        }
        Some(target)
    } else {
        None
    };

    if index.is_file() {
        fs::remove_file(&index).map_err(|e| Error::io(&index, e))?;
    }
    if let Some(children) = children {
        info!("removing previously generated pages in {}", children.display());
        fs::remove_dir_all(&children).map_err(|e| Error::io(&children, e))?;
    }
    Ok(())
}
