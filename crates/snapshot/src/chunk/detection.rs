//! Source language detection for tree-sitter based processing.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tree_sitter::{Parser, Tree};

/// Languages with a tree-sitter grammar available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Rust,
    TypeScript,
    Tsx,
    JavaScript,
    Python,
    Go,
    Unknown,
}

impl Language {
    /// Detect from a file extension.
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("rs") => Language::Rust,
            Some("ts") | Some("mts") | Some("cts") => Language::TypeScript,
            Some("tsx") => Language::Tsx,
            Some("js") | Some("jsx") | Some("mjs") | Some("cjs") => Language::JavaScript,
            Some("py") | Some("pyi") => Language::Python,
            Some("go") => Language::Go,
            _ => Language::Unknown,
        }
    }

    /// Get tree-sitter language for this language.
    pub fn tree_sitter_language(&self) -> Option<tree_sitter::Language> {
        match self {
            Language::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
            Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Language::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
            Language::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            Language::Python => Some(tree_sitter_python::LANGUAGE.into()),
            Language::Go => Some(tree_sitter_go::LANGUAGE.into()),
            Language::Unknown => None,
        }
    }

    pub fn has_tree_sitter_support(&self) -> bool {
        !matches!(self, Language::Unknown)
    }

    /// Parse `text`, returning `None` when no grammar is available, the
    /// parser cannot be configured, or the tree contains syntax errors.
    pub fn parse(&self, text: &str) -> Option<Tree> {
        let ts_language = self.tree_sitter_language()?;

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&ts_language) {
            tracing::warn!("Failed to set parser language {:?}: {}", self, e);
            return None;
        }

        let tree = parser.parse(text, None)?;
        if tree.root_node().has_error() {
            tracing::debug!("Syntax errors in {:?} source, ignoring parse tree", self);
            return None;
        }

        Some(tree)
    }
}
