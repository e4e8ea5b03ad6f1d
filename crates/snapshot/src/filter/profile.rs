//! Built-in inclusion profiles and the default skip list.

use paleae_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Paths that are never part of a snapshot under any built-in profile:
/// VCS metadata, caches, virtual environments, build output, coverage
/// artifacts and the tool's own ignore and config files.
pub const DEFAULT_SKIP: &[&str] = &[
    r"(^|/)\.(git|hg|svn)($|/)",
    r"(^|/)__pycache__($|/)",
    r"(^|/)\.(pytest|mypy|ruff)_cache($|/)",
    r"(^|/)(\.?venv|env)($|/)",
    r"(^|/)node_modules($|/)",
    r"(^|/)(build|dist)($|/)",
    r"(^|/)coverage($|/)",
    r"(^|/)htmlcov($|/)",
    r"(^|/)\.coverage($|/)?",
    r"(^|/)\.env($|/)",
    r"(^|/)\.paleaeignore($|/)?",
    r"(^|/)\.paleae\.yaml($|/)?",
];

const AI_OPTIMIZED_INCLUDE: &[&str] = &[
    r"^(src|tests)(/.*)?$",
    r"^pyproject\.toml$",
    r"^Cargo\.toml$",
    r"^README(\.md|\.rst)?$",
    r"^(ROADMAP|CHANGELOG)\.md$",
];

const AI_OPTIMIZED_EXTRA_EXCLUDE: &[&str] = &[r"(^|/)docs/"];

/// A named bundle of include/exclude regexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Everything that is not on the default skip list
    Minimal,
    /// Sources, tests and top-level project documents only
    AiOptimized,
}

impl Profile {
    pub const ALL: [Profile; 2] = [Profile::Minimal, Profile::AiOptimized];

    pub fn from_name(name: &str) -> AppResult<Self> {
        match name.trim() {
            "minimal" => Ok(Profile::Minimal),
            "ai_optimized" => Ok(Profile::AiOptimized),
            other => Err(AppError::Config(format!(
                "Unknown profile '{}' (expected one of: minimal, ai_optimized)",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Profile::Minimal => "minimal",
            Profile::AiOptimized => "ai_optimized",
        }
    }

    pub fn include_patterns(&self) -> &'static [&'static str] {
        match self {
            Profile::Minimal => &[".*"],
            Profile::AiOptimized => AI_OPTIMIZED_INCLUDE,
        }
    }

    pub fn exclude_patterns(&self) -> Vec<&'static str> {
        let mut patterns = DEFAULT_SKIP.to_vec();
        if *self == Profile::AiOptimized {
            patterns.extend_from_slice(AI_OPTIMIZED_EXTRA_EXCLUDE);
        }
        patterns
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
