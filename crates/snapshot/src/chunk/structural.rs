//! Code splitter using tree-sitter to cut at top-level definitions.

use super::detection::Language;
use super::lines::chunk_lines;
use super::{split_lines, Chunk, ChunkSplitter};
use tree_sitter::{Node, Tree};

pub struct StructuralSplitter {
    pub language: Language,
}

impl StructuralSplitter {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl ChunkSplitter for StructuralSplitter {
    fn split(&self, text: &str, max_chars: usize) -> Vec<Chunk> {
        let lines = split_lines(text);

        if !self.language.has_tree_sitter_support() {
            tracing::debug!(
                "No tree-sitter support for {:?}, using line splitter",
                self.language
            );
            return chunk_lines(&lines, 1, max_chars);
        }

        let Some(tree) = self.language.parse(text) else {
            return chunk_lines(&lines, 1, max_chars);
        };

        let spans = top_level_spans(&tree, self.language);
        let segments = segments_from_spans(&spans, lines.len());
        if segments.is_empty() {
            tracing::debug!("No top-level constructs found, using line splitter");
            return chunk_lines(&lines, 1, max_chars);
        }

        let mut chunks = Vec::new();
        for (start, end) in segments {
            let slice = &lines[start - 1..end];
            let segment = slice.join("\n");
            if segment.chars().count() <= max_chars {
                chunks.push(Chunk::new(start, end, segment));
            } else {
                chunks.extend(chunk_lines(slice, start, max_chars));
            }
        }

        tracing::debug!(
            "Structural splitter ({:?}) created {} chunks from {} lines",
            self.language,
            chunks.len(),
            lines.len()
        );

        chunks
    }
}

/// 1-based inclusive line spans of the top-level constructs, in source order.
fn top_level_spans(tree: &Tree, language: Language) -> Vec<(usize, usize)> {
    let root = tree.root_node();
    let mut cursor = root.walk();

    root.named_children(&mut cursor)
        .filter(|node| is_construct(node, language))
        .map(|node| {
            let start = node.start_position();
            let end = node.end_position();
            // A node ending at column 0 stops before that line
            let end_row = if end.column == 0 && end.row > start.row {
                end.row - 1
            } else {
                end.row
            };
            (start.row + 1, end_row + 1)
        })
        .collect()
}

fn is_construct(node: &Node, language: Language) -> bool {
    let kind = node.kind();
    match language {
        Language::Python => matches!(
            kind,
            "function_definition" | "class_definition" | "decorated_definition"
        ),
        Language::Rust => matches!(
            kind,
            "function_item"
                | "struct_item"
                | "enum_item"
                | "union_item"
                | "trait_item"
                | "impl_item"
                | "mod_item"
                | "type_item"
                | "macro_definition"
        ),
        Language::JavaScript | Language::TypeScript | Language::Tsx => match kind {
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "abstract_class_declaration"
            | "interface_declaration"
            | "type_alias_declaration"
            | "enum_declaration"
            | "module"
            | "internal_module" => true,
            "export_statement" => node.child_by_field_name("declaration").is_some(),
            _ => false,
        },
        Language::Go => matches!(
            kind,
            "function_declaration" | "method_declaration" | "type_declaration"
        ),
        Language::Unknown => false,
    }
}

/// Turn construct spans into contiguous segments covering lines `1..=total`.
///
/// Each segment starts right after the previous one, so leading comments,
/// imports and decorators stay with the construct that follows them. The
/// last segment runs to the end of the file. Constructs that end inside an
/// earlier segment are merged into it.
fn segments_from_spans(spans: &[(usize, usize)], total: usize) -> Vec<(usize, usize)> {
    let mut segments: Vec<(usize, usize)> = Vec::new();
    let mut next_start = 1;

    for &(_, end) in spans {
        let end = end.min(total);
        if end < next_start {
            continue;
        }
        segments.push((next_start, end));
        next_start = end + 1;
    }

    if let Some(last) = segments.last_mut() {
        last.1 = total;
    }

    segments
}
