//! Detection logic for languages, file kinds, and tags

use super::types::FileKind;
use std::path::Path;

fn lowercase_extension(relpath: &str) -> String {
    Path::new(relpath)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Language label from the file extension
pub fn language_from_path(relpath: &str) -> &'static str {
    match lowercase_extension(relpath).as_str() {
        "py" => "python",
        "pyi" => "python-stub",
        "md" => "markdown",
        "rst" => "rst",
        "json" => "json",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "ini" | "cfg" => "ini",
        "xml" => "xml",
        "csv" => "csv",
        "tsv" => "tsv",
        "js" => "javascript",
        "ts" => "typescript",
        "tsx" => "typescriptreact",
        "html" => "html",
        "css" => "css",
        "rs" => "rust",
        "go" => "go",
        "c" | "h" => "c",
        "cpp" | "hpp" | "cc" | "cxx" => "cpp",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "rb" => "ruby",
        "php" => "php",
        "sh" | "bash" => "shell",
        "ps1" => "powershell",
        _ => "text",
    }
}

/// File role from its relative path
pub fn kind_from_path(relpath: &str) -> FileKind {
    let low = relpath.replace('\\', "/").to_lowercase();

    if low.starts_with("tests/")
        || low.contains("/tests/")
        || low.ends_with("_test.py")
        || low.starts_with("test_")
        || low.contains("/test_")
    {
        return FileKind::Test;
    }

    match lowercase_extension(&low).as_str() {
        "py" | "pyi" | "js" | "ts" | "tsx" | "css" | "html" | "rs" | "go" | "c" | "h" | "cpp"
        | "hpp" | "java" | "kt" | "rb" | "php" | "sh" | "ps1" => FileKind::Code,
        "md" | "rst" | "txt" => FileKind::Doc,
        "json" | "toml" | "yml" | "yaml" | "ini" | "cfg" | "xml" => FileKind::Config,
        _ => FileKind::Data,
    }
}

/// Derive tags from a relative path
pub fn derive_tags(relpath: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let path = Path::new(relpath);

    // Directory names become tags; the file name does not
    if let Some(parent) = path.parent() {
        for component in parent.components() {
            if let std::path::Component::Normal(dir) = component {
                if let Some(dir_str) = dir.to_str() {
                    // Skip common root directories
                    if matches!(dir_str, "src" | "lib" | "target" | "node_modules") {
                        continue;
                    }
                    tags.push(dir_str.to_lowercase());
                }
            }
        }
    }

    let path_str = relpath.to_lowercase();

    if path_str.contains("test") || path_str.contains("spec") {
        tags.push("test".to_string());
    }
    if path_str.contains("doc") {
        tags.push("docs".to_string());
    }
    if path_str.contains("api") {
        tags.push("api".to_string());
    }
    if path_str.contains("util") || path_str.contains("helper") {
        tags.push("utils".to_string());
    }
    if path_str.contains("config") {
        tags.push("config".to_string());
    }

    tags.sort();
    tags.dedup();

    tags
}
