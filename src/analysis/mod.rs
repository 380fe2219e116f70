//! Scope-depth analysis.
//!
//! This module turns a parsed syntax tree into a per-offset depth map:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Source Text │────▶│ tree-sitter  │────▶│ depth-stamped │
//! └─────────────┘     │ parse        │     │ traversal     │
//!                     └──────────────┘     └──────┬────────┘
//!                                                 ▼
//!                                          ┌──────────────┐
//!                                          │ DepthMap     │
//!                                          │ (one u32 per │
//!                                          │  byte offset)│
//!                                          └──────────────┘
//! ```
//!
//! The traversal is deliberately selective: only the program root,
//! statement blocks, and named function declarations are recursed into.
//! See [`depths`] for the exact policy.

mod depths;

pub use depths::{compute_depths, DepthMap, DepthRun, Runs};
