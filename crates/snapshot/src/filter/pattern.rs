//! Compiled regular-expression sets evaluated against relative paths.

use paleae_core::{AppError, AppResult};
use regex::Regex;

/// A compiled regular expression together with its source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile one pattern string.
    pub fn compile(source: &str) -> AppResult<Self> {
        let regex = Regex::new(source).map_err(|e| AppError::InvalidPattern {
            pattern: source.to_string(),
            source: e,
        })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The original pattern string.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Unanchored search against `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// An ordered disjunction of patterns.
///
/// `matches` succeeds when any pattern's search succeeds. An empty set never
/// matches; callers that treat an empty include set as "everything" check
/// [`PatternSet::is_empty`] first.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compile every string, failing on the first one that is not a valid regex.
    pub fn compile<I, S>(sources: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = sources
            .into_iter()
            .map(|s| Pattern::compile(s.as_ref()))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// A set that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }

    /// First pattern that matches `path`, for diagnostics.
    pub fn first_match(&self, path: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.is_match(path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_compile_keeps_sources_in_order() {
        let set = PatternSet::compile(["^src/", r"\.py$"]).unwrap();
        let sources: Vec<&str> = set.iter().map(Pattern::as_str).collect();
        assert_eq!(sources, vec!["^src/", r"\.py$"]);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = PatternSet::compile(["^ok$", "["]).unwrap_err();
        match err {
            AppError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "["),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_matches_is_search_not_full_match() {
        let set = PatternSet::compile(["^src/", r"\.md$"]).unwrap();
        assert!(set.matches("src/main.py"));
        assert!(set.matches("README.md"));
        assert!(!set.matches("tests/test.py"));
        assert!(PatternSet::compile(["main"]).unwrap().matches("src/main.py"));
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = PatternSet::empty();
        assert!(set.is_empty());
        assert!(!set.matches(""));
        assert!(!set.matches("anything"));
    }

    #[test]
    fn test_first_match_reports_pattern() {
        let set = PatternSet::compile(["nope", "main", r"\.py$"]).unwrap();
        assert_eq!(set.first_match("src/main.py").map(Pattern::as_str), Some("main"));
        assert!(set.first_match("README").is_none());
    }

    proptest! {
        #[test]
        fn prop_matches_is_any_search(
            text in "[a-z/._]{0,20}",
            literals in proptest::collection::vec("[a-z._]{1,4}", 0..5),
        ) {
            let sources: Vec<String> = literals.iter().map(|l| regex::escape(l)).collect();
            let set = PatternSet::compile(&sources).unwrap();
            let expected = literals.iter().any(|l| text.contains(l.as_str()));
            prop_assert_eq!(set.matches(&text), expected);
        }
    }
}
