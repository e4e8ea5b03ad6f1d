//! Inclusion engine.
//!
//! Decides, for every relative path in a tree, whether it belongs in the
//! snapshot. Four layers are combined:
//!
//! 1. the profile's include and exclude regexes (with the default skip list),
//! 2. user-supplied extra include and exclude regexes,
//! 3. positive globs from `.paleaeignore`,
//! 4. negated (`!`) globs from `.paleaeignore`, which can only lift an
//!    exclusion and never widen the include set.

mod glob;
mod ignore_file;
mod pattern;
mod profile;

pub use glob::{translate, translate_globs};
pub use ignore_file::{parse_ignore_lines, read_ignore_file, IgnoreLines, IGNORE_FILE_NAME};
pub use pattern::{Pattern, PatternSet};
pub use profile::{Profile, DEFAULT_SKIP};

use paleae_core::AppResult;
use std::path::Path;

/// Compiled ignore-file rules.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    pub positive: PatternSet,
    pub negative: PatternSet,
    /// Whether an ignore file contributed at least one glob
    pub present: bool,
}

impl IgnoreRules {
    /// Translate and compile glob lines.
    pub fn from_lines(lines: &IgnoreLines) -> AppResult<Self> {
        Ok(Self {
            positive: PatternSet::compile(translate_globs(&lines.positive))?,
            negative: PatternSet::compile(translate_globs(&lines.negative))?,
            present: lines.present && !lines.is_empty(),
        })
    }

    /// Read and compile `<root>/.paleaeignore`.
    pub fn load(root: &Path) -> AppResult<Self> {
        Self::from_lines(&read_ignore_file(root))
    }
}

/// Every pattern set needed to filter one walk.
#[derive(Debug, Clone)]
pub struct Filters {
    pub profile: Profile,
    pub include: PatternSet,
    pub exclude: PatternSet,
    pub ignore: IgnoreRules,
}

impl Filters {
    /// Build filters from a profile plus extra patterns.
    ///
    /// Extra patterns are placed ahead of the profile's own. Any pattern that
    /// fails to compile aborts construction with `AppError::InvalidPattern`.
    pub fn new(
        profile: Profile,
        extra_include: &[String],
        extra_exclude: &[String],
        ignore: IgnoreRules,
    ) -> AppResult<Self> {
        let include = PatternSet::compile(
            extra_include
                .iter()
                .map(String::as_str)
                .chain(profile.include_patterns().iter().copied()),
        )?;
        let exclude = PatternSet::compile(
            extra_exclude
                .iter()
                .map(String::as_str)
                .chain(profile.exclude_patterns()),
        )?;

        tracing::debug!(
            profile = %profile,
            include = include.len(),
            exclude = exclude.len(),
            ignore_positive = ignore.positive.len(),
            ignore_negative = ignore.negative.len(),
            "Compiled filters"
        );

        Ok(Self {
            profile,
            include,
            exclude,
            ignore,
        })
    }

    /// Exclusion decision for a file: the exclude set or a positive ignore
    /// glob matched, and no negated glob lifted it.
    pub fn is_excluded(&self, relpath: &str) -> bool {
        let excluded = self.exclude.matches(relpath) || self.ignore.positive.matches(relpath);
        excluded && !self.ignore.negative.matches(relpath)
    }

    /// An empty include set places no constraint.
    pub fn is_included(&self, relpath: &str) -> bool {
        self.include.is_empty() || self.include.matches(relpath)
    }

    /// Path-level decision, before any content inspection.
    pub fn accepts(&self, relpath: &str) -> bool {
        !self.is_excluded(relpath) && self.is_included(relpath)
    }

    /// Whether the walk must not descend into `rel_dir`.
    ///
    /// Only the exclude set is consulted, with a trailing `/`; ignore-file
    /// negations cannot re-open a pruned directory.
    pub fn prunes_dir(&self, rel_dir: &str) -> bool {
        let with_slash = format!("{}/", rel_dir);
        self.exclude.matches(&with_slash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paleae_core::AppError;

    fn ignore(positive: &[&str], negative: &[&str]) -> IgnoreRules {
        let lines = IgnoreLines {
            present: true,
            positive: positive.iter().map(|s| s.to_string()).collect(),
            negative: negative.iter().map(|s| s.to_string()).collect(),
        };
        IgnoreRules::from_lines(&lines).unwrap()
    }

    #[test]
    fn test_negation_overrides_exclusion() {
        let filters =
            Filters::new(Profile::Minimal, &[], &[], ignore(&["*.log"], &["important.log"])).unwrap();
        assert!(filters.is_excluded("app.log"));
        assert!(!filters.is_excluded("important.log"));
        assert!(filters.accepts("important.log"));
    }

    #[test]
    fn test_negation_does_not_widen_includes() {
        let filters = Filters::new(
            Profile::AiOptimized,
            &[],
            &[],
            ignore(&["*.log"], &["important.log", "notes.txt"]),
        )
        .unwrap();
        assert!(!filters.is_excluded("important.log"));
        assert!(!filters.accepts("important.log"));
        assert!(!filters.accepts("notes.txt"));
        assert!(filters.accepts("src/app.py"));
    }

    #[test]
    fn test_negation_lifts_default_skip_for_files() {
        let filters = Filters::new(Profile::Minimal, &[], &[], ignore(&[], &[".env"])).unwrap();
        assert!(!filters.is_excluded(".env"));
        // Directory pruning still wins
        assert!(filters.prunes_dir(".git"));
    }

    #[test]
    fn test_prunes_dir_uses_trailing_slash() {
        let filters =
            Filters::new(Profile::AiOptimized, &[], &[r"^generated$".to_string()], IgnoreRules::default())
                .unwrap();
        assert!(filters.prunes_dir("node_modules"));
        assert!(filters.prunes_dir("pkg/build"));
        assert!(filters.prunes_dir("docs"));
        assert!(!filters.prunes_dir("src"));
        // `^generated$` cannot match "generated/"
        assert!(!filters.prunes_dir("generated"));
    }

    #[test]
    fn test_extra_patterns_come_first() {
        let filters = Filters::new(
            Profile::Minimal,
            &["^src/".to_string()],
            &[r"\.lock$".to_string()],
            IgnoreRules::default(),
        )
        .unwrap();
        assert_eq!(filters.include.iter().next().map(Pattern::as_str), Some("^src/"));
        assert_eq!(filters.exclude.iter().next().map(Pattern::as_str), Some(r"\.lock$"));
        assert!(filters.is_excluded("Cargo.lock"));
        // minimal's `.*` keeps everything else included
        assert!(filters.is_included("README.md"));
    }

    #[test]
    fn test_invalid_user_pattern() {
        let err = Filters::new(Profile::Minimal, &[], &["[".to_string()], IgnoreRules::default())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPattern { ref pattern, .. } if pattern == "["));
        assert!(err.to_string().contains("'['"));
    }

    #[test]
    fn test_empty_include_set_is_unconstrained() {
        let filters = Filters {
            profile: Profile::Minimal,
            include: PatternSet::empty(),
            exclude: PatternSet::empty(),
            ignore: IgnoreRules::default(),
        };
        assert!(filters.accepts("anything/at/all.txt"));
    }
}
