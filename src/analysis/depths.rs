//! Depth-tracking tree traversal.
//!
//! Every visited node stamps its byte range with the current depth, so
//! the innermost visited node wins for any offset it covers. Only three
//! kinds are recursed into: the program root (its top-level statements),
//! statement blocks (their contained statements), and named function
//! declarations (their body only). Blocks hidden inside any other
//! construct (loop bodies, `if` arms, arrow functions, class methods)
//! are never visited and inherit the depth of their nearest visited
//! ancestor.

use tree_sitter::Node;

use crate::parser::{self, Dialect, ParseError};

/// Kinds that open a new tracked scope.
///
/// Generators get a kind of their own in the grammar but are named
/// function declarations all the same, so they are tracked alike.
///
/// A function body is a `statement_block` of its own, so a body sits two
/// levels below the function's enclosing scope: one increment for the
/// declaration, one for the block. That double step is part of the depth
/// scheme consumers already map to colors and is kept as-is.
const TRACKED_KINDS: &[&str] = &[
    "statement_block",
    "function_declaration",
    "generator_function_declaration",
];

/// Per-offset scope depths for one document.
///
/// Indexed by byte offset; always exactly as long as the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthMap {
    depths: Vec<u32>,
}

impl DepthMap {
    /// Number of offsets (equals the source length in bytes).
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Depth at a byte offset, or `None` past the end.
    pub fn get(&self, offset: usize) -> Option<u32> {
        self.depths.get(offset).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.depths
    }

    /// Deepest value anywhere in the document (0 for empty input).
    pub fn max_depth(&self) -> u32 {
        self.depths.iter().copied().max().unwrap_or(0)
    }

    /// Maximal runs of equal depth, in offset order.
    ///
    /// Runs partition the document, so renderers can tint run-by-run
    /// instead of byte-by-byte. Run boundaries fall on node boundaries
    /// and therefore on UTF-8 character boundaries.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            depths: &self.depths,
            pos: 0,
        }
    }
}

/// A maximal span of consecutive offsets sharing one depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRun {
    /// First byte offset of the run.
    pub start: usize,
    /// One past the last byte offset of the run.
    pub end: usize,
    /// Depth shared by every offset in `[start, end)`.
    pub depth: u32,
}

/// Iterator over a [`DepthMap`]'s runs.
pub struct Runs<'a> {
    depths: &'a [u32],
    pos: usize,
}

impl Iterator for Runs<'_> {
    type Item = DepthRun;

    fn next(&mut self) -> Option<DepthRun> {
        let start = self.pos;
        let depth = *self.depths.get(start)?;
        let mut end = start + 1;
        while self.depths.get(end) == Some(&depth) {
            end += 1;
        }
        self.pos = end;
        Some(DepthRun { start, end, depth })
    }
}

/// Compute the scope depth of every byte offset in `source`.
///
/// The result always has exactly `source.len()` entries; offsets outside
/// any tracked scope are 0, a function's header is one deeper than its
/// enclosing scope, and its body two deeper. Empty input yields an empty
/// map. Fails with [`ParseError`] if the source does not parse cleanly
/// under `dialect`; no partial map is ever returned.
pub fn compute_depths(source: &str, dialect: Dialect) -> Result<DepthMap, ParseError> {
    let tree = parser::parse(source, dialect)?;

    let mut depths = vec![0u32; source.len()];
    visit(tree.root_node(), 0, &mut depths);

    Ok(DepthMap { depths })
}

/// Stamp `node`'s range at the current depth and recurse into the
/// children the policy enumerates. Depth is threaded as a parameter, so
/// there is no counter to unwind on the way out.
fn visit(node: Node, depth: u32, depths: &mut [u32]) {
    let depth = if TRACKED_KINDS.contains(&node.kind()) {
        depth + 1
    } else {
        depth
    };

    let start = node.start_byte().min(depths.len());
    let end = node.end_byte().min(depths.len());
    for slot in &mut depths[start..end] {
        *slot = depth;
    }

    match node.kind() {
        "program" | "statement_block" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                visit(child, depth, depths);
            }
        }
        "function_declaration" | "generator_function_declaration" => {
            if let Some(body) = node.child_by_field_name("body") {
                visit(body, depth, depths);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(source: &str) -> DepthMap {
        compute_depths(source, Dialect::TypeScript).expect("source should parse")
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let map = ts("");
        assert!(map.is_empty());
        assert_eq!(map.max_depth(), 0);
        assert_eq!(map.runs().count(), 0);
    }

    #[test]
    fn test_length_matches_input_bytes() {
        let source = "let s = \"héllo\";\n";
        let map = ts(source);
        assert_eq!(map.len(), source.len());
    }

    #[test]
    fn test_top_level_statements_stay_at_zero() {
        let source = "let x = 1;\nconsole.log(x);\n";
        let map = ts(source);
        assert!(map.as_slice().iter().all(|&d| d == 0));
    }

    #[test]
    fn test_function_header_is_one_body_is_two() {
        let source = "function f() { return 1; }";
        let map = ts(source);
        let brace = source.find('{').unwrap();

        assert_eq!(map.get(0), Some(1), "function keyword");
        assert_eq!(map.get(brace - 1), Some(1), "end of header");
        assert_eq!(map.get(brace), Some(2), "opening brace of body");
        assert_eq!(map.get(source.len() - 1), Some(2), "closing brace of body");
        assert_eq!(map.max_depth(), 2);
    }

    #[test]
    fn test_nested_function_goes_two_deeper() {
        let source = "function outer() { function inner() { return 1; } }";
        let map = ts(source);

        assert_eq!(map.get(source.find("outer").unwrap()), Some(1));
        // statements of outer's body, including inner's header
        assert_eq!(map.get(source.find("inner").unwrap()), Some(3));
        // inner's body: stamped 1, 2, 3, then 4 - the deepest stamp wins
        assert_eq!(map.get(source.find("return").unwrap()), Some(4));
        // outer's closing brace belongs to outer's body only
        assert_eq!(map.get(source.len() - 1), Some(2));
        assert_eq!(map.max_depth(), 4);
    }

    #[test]
    fn test_generator_and_async_functions_are_tracked() {
        // All three parse to named function declarations, even though
        // the grammar gives generators a separate kind.
        let sources = [
            "function* gen() { yield 1; }",
            "async function* gen() { yield 1; }",
            "async function f() { return 1; }",
        ];
        for source in sources {
            let map = ts(source);
            let brace = source.find('{').unwrap();
            assert_eq!(map.get(0), Some(1), "header of {:?}", source);
            assert_eq!(map.get(brace), Some(2), "body of {:?}", source);
            assert_eq!(map.max_depth(), 2, "max depth of {:?}", source);
        }
    }

    #[test]
    fn test_bare_block_increments() {
        let source = "{ let x = 1; }";
        let map = ts(source);
        assert_eq!(map.get(0), Some(1));
        assert_eq!(map.get(source.find("let").unwrap()), Some(1));
        assert_eq!(map.get(source.len() - 1), Some(1));
    }

    #[test]
    fn test_if_consequent_block_is_invisible() {
        // The traversal never descends into an if statement, so its
        // consequent block does not change depth.
        let source = "if (x) { y(); }";
        let map = ts(source);
        assert!(map.as_slice().iter().all(|&d| d == 0));
    }

    #[test]
    fn test_arrow_function_body_is_invisible() {
        let source = "const f = () => { return 1; };";
        let map = ts(source);
        assert!(map.as_slice().iter().all(|&d| d == 0));
    }

    #[test]
    fn test_loop_inside_function_keeps_body_depth() {
        let source = "function f() { for (;;) { g(); } }";
        let map = ts(source);
        // The for statement is a statement of f's body (depth 2) and is
        // not recursed into, so its inner block stays at 2.
        assert_eq!(map.get(source.find("for").unwrap()), Some(2));
        assert_eq!(map.get(source.find("g()").unwrap()), Some(2));
        assert_eq!(map.max_depth(), 2);
    }

    #[test]
    fn test_statements_after_a_function_return_to_zero() {
        let source = "function f() { return 1; }\nlet x = f();\n";
        let map = ts(source);
        assert_eq!(map.get(source.find("let").unwrap()), Some(0));
        assert_eq!(map.get(source.len() - 1), Some(0));
    }

    #[test]
    fn test_malformed_input_is_a_parse_error() {
        let err = compute_depths("function f( {", Dialect::TypeScript).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_markup_depths_under_tsx_dialect() {
        let source = "function App() { return <div>hi</div>; }";
        let map = compute_depths(source, Dialect::Tsx).unwrap();
        assert_eq!(map.len(), source.len());
        // The return statement, markup included, is a statement of the
        // body block; markup interiors are not recursed into.
        assert_eq!(map.get(source.find("div").unwrap()), Some(2));
        assert_eq!(map.max_depth(), 2);
    }

    #[test]
    fn test_runs_partition_the_document() {
        let source = "function f() { return 1; }";
        let map = ts(source);
        let brace = source.find('{').unwrap();

        let runs: Vec<DepthRun> = map.runs().collect();
        assert_eq!(
            runs,
            vec![
                DepthRun {
                    start: 0,
                    end: brace,
                    depth: 1
                },
                DepthRun {
                    start: brace,
                    end: source.len(),
                    depth: 2
                },
            ]
        );

        // contiguous cover of the whole document
        let mut pos = 0;
        for run in map.runs() {
            assert_eq!(run.start, pos);
            assert!(run.end > run.start);
            pos = run.end;
        }
        assert_eq!(pos, source.len());
    }
}
