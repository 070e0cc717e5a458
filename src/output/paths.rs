//! Path helpers for generated pages

use std::path::{Component, Path, PathBuf};

/// Path from directory `from` to `to`, both absolute.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for component in &to[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// `/`-separated form of a relative path, as Sphinx expects.
pub fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Toctree entry for `child` inside the index page `parent`: the child page
/// relative to the parent page's directory, without extension.
pub fn toctree_entry(parent: &Path, child: &Path) -> String {
    let base = parent.parent().unwrap_or(Path::new(""));
    let rel = child.strip_prefix(base).unwrap_or(child);
    to_posix(&rel.with_extension(""))
}

/// Dotted module path of a Python file relative to its package root.
///
/// The extension is dropped and a trailing `__init__` names its package.
/// Files outside the package root fall back to their bare module name.
///
/// ```
/// use std::path::Path;
/// use scriptdoc::output::module_path;
///
/// let root = Path::new("/work");
/// assert_eq!(module_path(Path::new("/work/pkg/io/read.py"), root), "pkg.io.read");
/// assert_eq!(module_path(Path::new("/work/pkg/__init__.py"), root), "pkg");
/// ```
pub fn module_path(source: &Path, package_root: &Path) -> String {
    let rel = source
        .strip_prefix(package_root)
        .unwrap_or_else(|_| Path::new(source.file_name().unwrap_or(source.as_os_str())));
    let rel = rel.with_extension("");

    let mut parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    if parts.len() > 1 && parts.last().is_some_and(|last| last == "__init__") {
        parts.pop();
    }
    parts.join(".")
}
