//! Depthtint - scope-depth analysis for source tinting.
//!
//! Depthtint computes, for every byte offset of a JavaScript or
//! TypeScript document, the lexical nesting depth at that position:
//! the number of tracked scopes (named function declarations and
//! statement blocks) enclosing it. Renderers map each depth to a color,
//! producing source text tinted by how deeply nested it is.
//!
//! # Architecture
//!
//! - `parser`: dialect selection and the tree-sitter parsing front-end
//! - `analysis`: the depth-stamping traversal producing a [`DepthMap`]
//! - `report`: output formatting (tinted source, JSON)
//! - `cli`: command-line driver
//!
//! The analysis itself is a pure function: [`compute_depths`] takes a
//! source string and a [`Dialect`] and returns one depth per byte
//! offset, or a [`ParseError`] if the source does not parse cleanly.
//! It keeps no state between calls and never returns a partial result.

pub mod analysis;
pub mod cli;
pub mod parser;
pub mod report;

pub use analysis::{compute_depths, DepthMap, DepthRun};
pub use parser::{Dialect, ParseError};
