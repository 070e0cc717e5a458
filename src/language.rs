//! Script language detection
//!
//! Maps file names to one of the supported script languages. Lookup walks an
//! ordered registry of file name patterns and returns the first language
//! whose pattern matches, so resolution never depends on hash ordering.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::rules::{RuleSet, rules_for};

/// Supported script languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    R,
    Matlab,
    Stata,
    Python,
    Julia,
}

/// File name patterns in resolution priority order.
const REGISTRY: [(Language, &str); 5] = [
    (Language::R, r"\.(r|rscript)$"),
    (Language::Matlab, r"\.m$"),
    (Language::Stata, r"\.do$"),
    (Language::Python, r"\.py\w*$"),
    (Language::Julia, r"\.(jl|julia)$"),
];

static COMPILED_REGISTRY: LazyLock<Vec<(Language, Regex)>> = LazyLock::new(|| {
    REGISTRY
        .iter()
        .map(|&(language, pattern)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("file name pattern is invalid");
            (language, regex)
        })
        .collect()
});

impl Language {
    /// All languages, in resolution priority order.
    pub const ALL: [Language; 5] = [
        Language::R,
        Language::Matlab,
        Language::Stata,
        Language::Python,
        Language::Julia,
    ];

    /// Detect the language of a file from its name.
    ///
    /// Matching is case-insensitive and only looks at the final path
    /// component.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use scriptdoc::Language;
    ///
    /// assert_eq!(Language::from_path(Path::new("clean.DO")), Some(Language::Stata));
    /// assert_eq!(Language::from_path(Path::new("fit.jl")), Some(Language::Julia));
    /// assert_eq!(Language::from_path(Path::new("README.md")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        COMPILED_REGISTRY
            .iter()
            .find(|(_, regex)| regex.is_match(&name))
            .map(|&(language, _)| language)
    }

    /// Short identifier, as accepted by `FromStr`.
    pub fn identifier(&self) -> &'static str {
        match self {
            Language::R => "r",
            Language::Matlab => "matlab",
            Language::Stata => "stata",
            Language::Python => "python",
            Language::Julia => "julia",
        }
    }

    /// Returns the human-readable name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::R => "R",
            Language::Matlab => "MATLAB",
            Language::Stata => "Stata",
            Language::Python => "Python",
            Language::Julia => "Julia",
        }
    }

    /// Comment rules used to extract headers from files of this language.
    pub fn rules(&self) -> &'static RuleSet {
        rules_for(*self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.identifier() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown language '{}' (expected one of: r, matlab, stata, python, julia)",
                    s
                )
            })
    }
}

/// Resolve the language of `path`, failing with [`Error::UnknownFileType`]
/// when no pattern matches.
///
/// ```
/// use scriptdoc::{Language, resolve};
///
/// assert_eq!(resolve("analysis.rscript").unwrap(), Language::R);
/// assert!(resolve("notes.txt").is_err());
/// ```
pub fn resolve(path: impl AsRef<Path>) -> Result<Language> {
    let path = path.as_ref();
    Language::from_path(path).ok_or_else(|| Error::UnknownFileType {
        path: path.to_path_buf(),
    })
}
