//! Comment syntax rule sets
//!
//! A [`RuleSet`] is plain data: an ordered list of block patterns and an
//! ordered list of line-comment rules. Every supported language is one
//! instance of it, built lazily on first use and shared read-only after that.
//!
//! All patterns are anchored at the start of the text. Only whitespace and
//! blank lines may come before a header.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::language::Language;

/// `'...'` string literal at the top of the file.
const SINGLE_QUOTED: &str = r"\A\s*'[ \t]*(?P<comment>[^']*)'";
/// `"..."` string literal at the top of the file.
const DOUBLE_QUOTED: &str = r#"\A\s*"[ \t]*(?P<comment>[^"]*)""#;
/// MATLAB `%{ ... %}` block.
const PERCENT_BRACE_BLOCK: &str = r"\A\s*%\{[ \t]*(?P<comment>(?s:.*?))%\}";
/// Stata `/* ... */` block.
const SLASH_STAR_BLOCK: &str = r"\A\s*/\*[ \t]*(?P<comment>(?s:.*?))\*/";
/// Julia `#= ... =#` block. Ends at the first `=#`, so the body of a nested
/// `#= a #= b =# c =#` stops after `b `.
const HASH_EQUALS_BLOCK: &str = r"\A\s*#=[ \t]*(?P<comment>(?s:.*?))=#";
/// Python `'''...'''` docstring.
const TRIPLE_SINGLE_QUOTED: &str = r"\A\s*'''[ \t]*(?P<comment>(?s:.*?))'''";
/// Python `"""..."""` docstring.
const TRIPLE_DOUBLE_QUOTED: &str = r#"\A\s*"""[ \t]*(?P<comment>(?s:.*?))""""#;

const HASH_LINES: (&str, &str) = (
    r"\A(?:\s*\n)*(?P<comment>(?:[ \t]*#[^\n]*(?:\n|\z))+)",
    r"^\s*#+",
);
const PERCENT_LINES: (&str, &str) = (
    r"\A(?:\s*\n)*(?P<comment>(?:[ \t]*%+[^\n]*(?:\n|\z))+)",
    r"^\s*%+",
);
const STAR_LINES: (&str, &str) = (
    r"\A(?:\s*\n)*(?P<comment>(?:[ \t]*\*[^\n]*(?:\n|\z))+)",
    r"^\s*\*+",
);
// Only whole-line `//` comments count; trailing comments after code never
// start a header.
const DOUBLE_SLASH_LINES: (&str, &str) = (
    r"\A(?:\s*\n)*(?P<comment>(?:[ \t]*//[^\n]*(?:\n|\z))+)",
    r"^\s*//",
);

static R_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(&[SINGLE_QUOTED, DOUBLE_QUOTED], &[HASH_LINES])
        .expect("R rule set is invalid")
});

static MATLAB_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        &[SINGLE_QUOTED, DOUBLE_QUOTED, PERCENT_BRACE_BLOCK],
        &[PERCENT_LINES],
    )
    .expect("MATLAB rule set is invalid")
});

static STATA_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(&[SLASH_STAR_BLOCK], &[STAR_LINES, DOUBLE_SLASH_LINES])
        .expect("Stata rule set is invalid")
});

static JULIA_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(&[HASH_EQUALS_BLOCK], &[HASH_LINES]).expect("Julia rule set is invalid")
});

static PYTHON_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(&[TRIPLE_SINGLE_QUOTED, TRIPLE_DOUBLE_QUOTED], &[HASH_LINES])
        .expect("Python rule set is invalid")
});

/// Returns the shared rule set for a language.
pub fn rules_for(language: Language) -> &'static RuleSet {
    match language {
        Language::R => &R_RULES,
        Language::Matlab => &MATLAB_RULES,
        Language::Stata => &STATA_RULES,
        Language::Julia => &JULIA_RULES,
        Language::Python => &PYTHON_RULES,
    }
}

/// Block and line-comment patterns for one language.
#[derive(Debug, Clone)]
pub struct RuleSet {
    blocks: Vec<Regex>,
    lines: Vec<LineRule>,
}

impl RuleSet {
    /// Compile a rule set.
    ///
    /// `blocks` are regexes matching a whole delimited comment; each must
    /// capture the body in a group named `comment`. `lines` pairs a regex
    /// matching a run of comment lines (also with a `comment` group) with a
    /// regex that strips the marker from one line of that run.
    ///
    /// Order matters: the first block pattern that matches wins, and line
    /// rules are tried in order only when no block matched.
    pub fn new(blocks: &[&str], lines: &[(&str, &str)]) -> Result<Self> {
        let blocks = blocks
            .iter()
            .map(|pattern| compile_with_comment_group(pattern))
            .collect::<Result<Vec<_>>>()?;
        let lines = lines
            .iter()
            .map(|(run, marker)| LineRule::new(run, marker))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { blocks, lines })
    }

    pub fn block_patterns(&self) -> &[Regex] {
        &self.blocks
    }

    pub fn line_rules(&self) -> &[LineRule] {
        &self.lines
    }
}

/// A run of start-of-line comments and how to strip their marker.
#[derive(Debug, Clone)]
pub struct LineRule {
    run: Regex,
    marker: Regex,
}

impl LineRule {
    pub fn new(run: &str, marker: &str) -> Result<Self> {
        Ok(Self {
            run: compile_with_comment_group(run)?,
            marker: Regex::new(marker)?,
        })
    }

    /// The captured run of comment lines at the top of `text`, if any.
    pub fn match_run<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.run
            .captures(text)
            .and_then(|caps| caps.name("comment"))
            .map(|m| m.as_str())
    }

    /// Split a line into its comment marker (with the indentation before it)
    /// and the remaining text.
    ///
    /// `marker + rest == line` always holds; a line without a marker yields
    /// an empty marker.
    pub fn split_marker<'l>(&self, line: &'l str) -> (&'l str, &'l str) {
        match self.marker.find(line) {
            Some(m) if m.start() == 0 => line.split_at(m.end()),
            _ => ("", line),
        }
    }
}

fn compile_with_comment_group(pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern)?;
    if !regex.capture_names().any(|name| name == Some("comment")) {
        return Err(Error::MissingCommentGroup {
            pattern: pattern.to_string(),
        });
    }
    Ok(regex)
}
