//! reStructuredText page templates
//!
//! Pages are laid out for Sphinx: script pages embed the header and a
//! `literalinclude` of the raw file, Python modules defer to `automodule`,
//! and directory pages hold a `toctree` of their children.

const SCRIPT_TITLE_MIN_WIDTH: usize = 50;
const INDEX_TITLE_MIN_WIDTH: usize = 40;

/// Heading underline, at least as wide as the title.
fn underline(title: &str, min_width: usize) -> String {
    "-".repeat(title.chars().count().max(min_width))
}

/// Page for a script: its header followed by the numbered source.
pub fn render_script_page(file_name: &str, header: &str, include_path: &str) -> String {
    format!(
        "
{file_name}
{line}

Header
~~~~~~

{header}


Raw Code
~~~~~~~~

.. literalinclude:: {include_path}
    :linenos:

",
        line = underline(file_name, SCRIPT_TITLE_MIN_WIDTH),
    )
}

/// Page for a Python module, documented through autodoc.
pub fn render_module_page(file_name: &str, module: &str) -> String {
    format!(
        "
{file_name}
{line}

.. automodule:: {module}
    :members:
    :undoc-members:
    :show-inheritance:

",
        line = underline(file_name, SCRIPT_TITLE_MIN_WIDTH),
    )
}

/// Directory index listing child pages in a toctree.
pub fn render_index_page(title: &str, entries: &[String]) -> String {
    let mut page = format!(
        "{title}\n{line}\n\n.. toctree::\n    :maxdepth: 2\n\n",
        line = underline(title, INDEX_TITLE_MIN_WIDTH),
    );
    for entry in entries {
        page.push_str("    ");
        page.push_str(entry);
        page.push('\n');
    }
    page
}
