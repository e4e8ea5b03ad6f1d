//! Import extraction.
//!
//! Dependencies are reduced to the name a reader would look up: the root
//! package for Python and Rust, the module specifier for JavaScript and
//! TypeScript, the import path for Go. Relative imports are skipped.

use crate::chunk::Language;
use tree_sitter::Node;

/// Imported modules of `text`, deduplicated in first-seen order.
///
/// Sources that fail to parse have no dependencies.
pub fn extract_dependencies(language: Language, text: &str) -> Vec<String> {
    let Some(tree) = language.parse(text) else {
        return Vec::new();
    };

    let source = text.as_bytes();
    let mut deps: Vec<String> = Vec::new();
    let mut push = |dep: Option<String>| {
        if let Some(dep) = dep.filter(|d| !d.is_empty()) {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
    };

    walk(tree.root_node(), |node| match language {
        Language::Python => python_imports(node, source).into_iter().for_each(|d| push(Some(d))),
        Language::Rust => push(rust_import(node, source)),
        Language::JavaScript | Language::TypeScript | Language::Tsx => {
            push(js_import(node, source))
        }
        Language::Go => push(go_import(node, source)),
        Language::Unknown => {}
    });

    tracing::trace!("Extracted {} dependencies ({:?})", deps.len(), language);
    deps
}

/// Pre-order visit of every node under `root`.
fn walk<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn text_of<'s>(node: Node<'_>, source: &'s [u8]) -> Option<&'s str> {
    node.utf8_text(source).ok()
}

fn first_segment(path: &str, separator: &str) -> String {
    path.split(separator).next().unwrap_or("").trim().to_string()
}

fn python_imports(node: Node<'_>, source: &[u8]) -> Vec<String> {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            node.children_by_field_name("name", &mut cursor)
                .filter_map(|name| {
                    // `import a.b as c` keeps the dotted name under `name`
                    let dotted = match name.kind() {
                        "aliased_import" => name.child_by_field_name("name")?,
                        _ => name,
                    };
                    text_of(dotted, source).map(|t| first_segment(t, "."))
                })
                .collect()
        }
        "import_from_statement" => node
            .child_by_field_name("module_name")
            .filter(|module| module.kind() != "relative_import")
            .and_then(|module| text_of(module, source))
            .map(|t| vec![first_segment(t, ".")])
            .unwrap_or_default(),
        "future_import_statement" => vec!["__future__".to_string()],
        _ => Vec::new(),
    }
}

fn rust_import(node: Node<'_>, source: &[u8]) -> Option<String> {
    let name = match node.kind() {
        "use_declaration" => {
            let argument = text_of(node.child_by_field_name("argument")?, source)?;
            let root: String = argument
                .trim_start_matches("::")
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            root
        }
        "extern_crate_declaration" => text_of(node.child_by_field_name("name")?, source)?.to_string(),
        _ => return None,
    };

    match name.as_str() {
        "crate" | "self" | "super" => None,
        _ => Some(name),
    }
}

fn js_import(node: Node<'_>, source: &[u8]) -> Option<String> {
    if !matches!(node.kind(), "import_statement" | "export_statement") {
        return None;
    }

    let specifier = unquote(text_of(node.child_by_field_name("source")?, source)?);
    (!specifier.starts_with('.')).then(|| specifier.to_string())
}

fn go_import(node: Node<'_>, source: &[u8]) -> Option<String> {
    if node.kind() != "import_spec" {
        return None;
    }
    let path = text_of(node.child_by_field_name("path")?, source)?;
    Some(unquote(path).to_string())
}

fn unquote(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_dependencies() {
        let code = "from __future__ import annotations\nimport os, sys.path\nfrom collections import OrderedDict\nfrom .local import x\nfrom . import y\nimport numpy.linalg as la\n\ndef f():\n    import json\n    import os\n";
        assert_eq!(
            extract_dependencies(Language::Python, code),
            vec!["__future__", "os", "sys", "collections", "numpy", "json"]
        );
    }

    #[test]
    fn test_rust_dependencies() {
        let code = "use std::collections::HashMap;\nuse serde::{Deserialize, Serialize};\nuse crate::error::AppError;\nuse ::regex::Regex;\nextern crate alloc;\n\nfn main() {}\n";
        assert_eq!(
            extract_dependencies(Language::Rust, code),
            vec!["std", "serde", "regex", "alloc"]
        );
    }

    #[test]
    fn test_javascript_dependencies() {
        let code = "import React from \"react\";\nimport { a } from './local';\nimport 'polyfill';\nexport { b } from \"lodash/fp\";\nimport other from 'react';\n";
        assert_eq!(
            extract_dependencies(Language::JavaScript, code),
            vec!["react", "polyfill", "lodash/fp"]
        );
    }

    #[test]
    fn test_typescript_dependencies() {
        let code = "import type { Config } from \"./config\";\nimport { z } from \"zod\";\n\nexport const x: number = 1;\n";
        assert_eq!(extract_dependencies(Language::TypeScript, code), vec!["zod"]);
    }

    #[test]
    fn test_go_dependencies() {
        let code = "package main\n\nimport (\n\t\"fmt\"\n\tyaml \"gopkg.in/yaml.v3\"\n)\n\nfunc main() {}\n";
        assert_eq!(
            extract_dependencies(Language::Go, code),
            vec!["fmt", "gopkg.in/yaml.v3"]
        );
    }

    #[test]
    fn test_parse_failure_has_no_dependencies() {
        assert!(extract_dependencies(Language::Python, "import os\ndef (:\n").is_empty());
        assert!(extract_dependencies(Language::Unknown, "import os").is_empty());
    }
}
