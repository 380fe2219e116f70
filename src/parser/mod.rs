//! Dialect selection and the tree-sitter parsing front-end.
//!
//! Wraps tree-sitter behind a fail-fast contract: tree-sitter tolerates
//! broken input and returns a tree containing ERROR and missing nodes,
//! but depth analysis must never stamp a half-parsed document, so any
//! such node is converted into a [`ParseError`] before the tree reaches
//! the analyzer.

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Source dialect, selecting which grammar parses the input.
///
/// `Tsx` is the permissive-markup dialect: it accepts embedded JSX-style
/// markup that the plain TypeScript grammar rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Dialect {
    /// The tree-sitter grammar for this dialect.
    pub fn language(&self) -> Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Resolve a dialect from a file extension (without the dot).
    pub fn for_extension(ext: &str) -> Option<Dialect> {
        match ext {
            "js" | "mjs" | "cjs" => Some(Dialect::JavaScript),
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" | "jsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    /// Resolve a dialect name as given on the command line.
    pub fn from_name(name: &str) -> Option<Dialect> {
        match name {
            "js" | "javascript" => Some(Dialect::JavaScript),
            "ts" | "typescript" => Some(Dialect::TypeScript),
            "tsx" | "jsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    /// The dialect identifier (e.g., "typescript").
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::JavaScript => "javascript",
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure to obtain a clean syntax tree.
///
/// Always fatal to the current analysis call; the analyzer never
/// produces a partial depth map.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The grammar rejected part of the input. Carries the first
    /// diagnostic found in document order.
    #[error("syntax error at {line}:{col}: {message}")]
    Syntax {
        /// Line of the offending node (1-indexed).
        line: usize,
        /// Column of the offending node (1-indexed).
        col: usize,
        /// Byte offset of the offending node.
        offset: usize,
        /// Human-readable description.
        message: String,
    },
    /// The grammar and the tree-sitter runtime disagree on ABI version.
    #[error("grammar unavailable: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// tree-sitter returned no tree at all.
    #[error("parser produced no tree")]
    Unavailable,
}

/// Parse `source` under `dialect`, failing on any syntax error.
pub fn parse(source: &str, dialect: Dialect) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&dialect.language())?;

    let tree = parser.parse(source, None).ok_or(ParseError::Unavailable)?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(
            first_syntax_error(root, source).unwrap_or(ParseError::Syntax {
                line: 1,
                col: 1,
                offset: 0,
                message: "syntax error".to_string(),
            }),
        );
    }
    Ok(tree)
}

/// Find the first ERROR or missing node in document order and turn it
/// into a diagnostic.
fn first_syntax_error(node: Node, source: &str) -> Option<ParseError> {
    if node.is_error() {
        return Some(syntax_error_at(node, unexpected_message(node, source)));
    }
    if node.is_missing() {
        return Some(syntax_error_at(node, format!("missing {}", node.kind())));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.has_error() && !child.is_missing() {
            continue;
        }
        if let Some(err) = first_syntax_error(child, source) {
            return Some(err);
        }
    }
    None
}

fn unexpected_message(node: Node, source: &str) -> String {
    let text = node.utf8_text(source.as_bytes()).unwrap_or("").trim();
    if text.is_empty() {
        "unexpected end of input".to_string()
    } else {
        let snippet: String = text.chars().take(24).collect();
        format!("unexpected {:?}", snippet)
    }
}

fn syntax_error_at(node: Node, message: String) -> ParseError {
    let pos = node.start_position();
    ParseError::Syntax {
        line: pos.row + 1,
        col: pos.column + 1,
        offset: node.start_byte(),
        message,
    }
}
