//! Header comment extraction
//!
//! Finds the leading documentation comment of a script and returns it with
//! its comment markers removed.
//!
//! # Precedence
//!
//! 1. Block patterns are tried in order. The first one that matches at the
//!    top of the file wins and its body is returned verbatim.
//! 2. Only when no block matched, line-comment rules are tried in order. The
//!    first matching run is stripped of its markers and dedented.
//! 3. Otherwise the header is empty. A missing or malformed header is never
//!    an error.

use std::path::Path;

use crate::error::Result;
use crate::file_utils::SourceFile;
use crate::rules::{LineRule, RuleSet};

/// Which kind of comment produced a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Block,
    Line,
}

/// A header found at the top of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub kind: HeaderKind,
    pub text: String,
}

/// Locate the header of `text` using `rules`.
///
/// Returns `None` when the file does not start with a comment.
pub fn find_header(text: &str, rules: &RuleSet) -> Option<Header> {
    for pattern in rules.block_patterns() {
        if let Some(body) = pattern.captures(text).and_then(|caps| caps.name("comment")) {
            return Some(Header {
                kind: HeaderKind::Block,
                text: body.as_str().to_string(),
            });
        }
    }

    for rule in rules.line_rules() {
        if let Some(run) = rule.match_run(text) {
            return Some(Header {
                kind: HeaderKind::Line,
                text: normalize_run(run, rule),
            });
        }
    }

    None
}

/// Extract the header of `text`, or an empty string if there is none.
///
/// # Examples
///
/// ```
/// use scriptdoc::{Language, extract_header};
///
/// let stata = "* header line one\n* header line two\n\ncode here";
/// assert_eq!(
///     extract_header(stata, Language::Stata.rules()),
///     "header line one\nheader line two"
/// );
///
/// let python = "print('no header')";
/// assert_eq!(extract_header(python, Language::Python.rules()), "");
/// ```
pub fn extract_header(text: &str, rules: &RuleSet) -> String {
    find_header(text, rules)
        .map(|header| header.text)
        .unwrap_or_default()
}

/// Read a file, resolve its language from the name and extract its header.
pub fn extract_file_header(path: &Path) -> Result<String> {
    let file = SourceFile::read(path)?;
    Ok(file.header())
}

/// Strip markers from a captured run of comment lines and dedent the result.
fn normalize_run(run: &str, rule: &LineRule) -> String {
    let run = run.strip_suffix('\n').unwrap_or(run);
    let stripped: Vec<&str> = run
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            rule.split_marker(line).1
        })
        .collect();
    dedent_lines(&stripped).join("\n")
}

/// Remove the smallest leading-whitespace width shared by the non-empty lines
/// of `text`.
///
/// Lines shorter than that width are kept as they are. Applying it twice
/// gives the same result as applying it once.
///
/// ```
/// use scriptdoc::dedent;
///
/// assert_eq!(dedent("   a\n     b\n\n   c"), "a\n  b\n\nc");
/// ```
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    dedent_lines(&lines).join("\n")
}

fn dedent_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    // No non-empty lines means nothing to strip.
    let width = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.chars().count() < width {
                line
            } else {
                skip_chars(line, width)
            }
        })
        .collect()
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn skip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}
