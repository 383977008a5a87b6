//! Search pattern construction.
//!
//! Search queries are matched case-insensitively against every user field.
//! In [`SearchMode::Regex`] the query is taken as a regular-expression
//! fragment, so `^a` or `.com$` behave as patterns; [`SearchMode::Literal`]
//! escapes metacharacters first so the query only matches itself.

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

/// How a raw search query is turned into a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Interpret the query as a regular expression.
    #[default]
    Regex,
    /// Match the query text literally.
    Literal,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regex" => Ok(Self::Regex),
            "literal" => Ok(Self::Literal),
            other => Err(format!("unknown search mode '{other}'")),
        }
    }
}

/// Reasons a query cannot become a [`SearchPattern`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchPatternError {
    /// No query text was supplied.
    #[error("Search query is required")]
    Empty,
    /// The query is not a valid regular expression.
    #[error("Invalid regular expression: /{pattern}/: {message}")]
    Invalid {
        /// The offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },
}

/// A compiled, case-insensitive search pattern.
///
/// # Examples
/// ```
/// use directory_backend::domain::{SearchMode, SearchPattern};
///
/// let pattern = SearchPattern::parse(Some("ADA"), SearchMode::Regex).expect("valid");
/// assert!(pattern.is_match("ada@example.com"));
///
/// let literal = SearchPattern::parse(Some("a.c"), SearchMode::Literal).expect("valid");
/// assert!(!literal.is_match("abc"));
/// ```
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
}

impl SearchPattern {
    /// Build a pattern from a raw query.
    ///
    /// Only an absent or empty query is rejected; whitespace is a legitimate
    /// pattern.
    pub fn parse(query: Option<&str>, mode: SearchMode) -> Result<Self, SearchPatternError> {
        let raw = query.filter(|q| !q.is_empty()).ok_or(SearchPatternError::Empty)?;
        let source = match mode {
            SearchMode::Regex => raw.to_owned(),
            SearchMode::Literal => regex::escape(raw),
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|err| SearchPatternError::Invalid {
                pattern: source.clone(),
                message: err.to_string(),
            })?;
        Ok(Self { regex })
    }

    /// Pattern source, as handed to stores that evaluate it themselves.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether `haystack` contains a match.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for SearchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/i", self.as_str())
    }
}
