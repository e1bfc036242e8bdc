//! Placeholder Extractor - Find `{name}` tokens inside template text
//!
//! A placeholder is the shortest brace pair on a single line. Nested braces are
//! not supported: a pair closes at the first `}` after its `{`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Shortest `{...}` match; `.` does not cross line breaks
pub const VARIABLE_PATTERN: &str = r"\{(.*?)\}";

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VARIABLE_PATTERN).expect("placeholder pattern is a valid regex"));

/// Scans template text for placeholder names
pub struct PlaceholderExtractor;

impl PlaceholderExtractor {
    /// The compiled placeholder pattern, shared with the resolver
    pub(crate) fn pattern() -> &'static Regex {
        &VARIABLE_RE
    }

    /// Return the distinct placeholder names in `text`, in first-occurrence order
    ///
    /// `{}` contributes the empty name.
    pub fn extract(text: &str) -> Vec<String> {
        Self::extract_all([text])
    }

    /// Return the distinct placeholder names across several templates
    pub fn extract_all<'a, I>(texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for text in texts {
            for caps in VARIABLE_RE.captures_iter(text) {
                let name = caps.get(1).map_or("", |m| m.as_str());
                if seen.insert(name.to_string()) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}
