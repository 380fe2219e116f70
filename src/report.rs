//! Output formatting for depth analysis results.
//!
//! Supports two output formats:
//! - Pretty: the source re-printed with every run of equal depth tinted
//!   on a six-color cycle
//! - JSON: structured per-file depth arrays for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analysis::DepthMap;
use crate::parser::Dialect;

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files: Vec<JsonFileDepths>,
}

/// Per-file result.
///
/// A file that parsed carries `length`, `max_depth`, and `depths`; a
/// file that failed carries `error` and nothing else.
#[derive(Serialize, Deserialize)]
pub struct JsonFileDepths {
    pub path: String,
    pub dialect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depths: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JsonFileDepths {
    /// Entry for a successfully analyzed file.
    pub fn ok(path: &str, dialect: Dialect, map: &DepthMap) -> Self {
        Self {
            path: path.to_string(),
            dialect: dialect.name().to_string(),
            length: Some(map.len()),
            max_depth: Some(map.max_depth()),
            depths: Some(map.as_slice().to_vec()),
            error: None,
        }
    }

    /// Entry for a file that failed to parse.
    pub fn failed(path: &str, dialect: Dialect, error: &str) -> Self {
        Self {
            path: path.to_string(),
            dialect: dialect.name().to_string(),
            length: None,
            max_depth: None,
            depths: None,
            error: Some(error.to_string()),
        }
    }
}

/// Write all results in JSON format.
pub fn write_json(files: Vec<JsonFileDepths>) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files,
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Hue cycle for depth tinting. Depth d maps to hue d * 60 on the color
/// wheel, which lands on the six primary/secondary terminal colors.
const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// The terminal color for a scope depth.
pub fn tint(depth: u32) -> Color {
    PALETTE[(depth as usize) % PALETTE.len()]
}

/// Write one file's tinted source to stdout.
pub fn write_pretty(path: &str, dialect: Dialect, source: &str, map: &DepthMap) {
    // Header
    println!();
    print!("  ");
    print!("{}", "depthtint".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", "File:    ".dimmed());
    println!("{}", path);
    print!("  {}", "Dialect: ".dimmed());
    println!("{}", dialect);
    print!("  {}", "Depth:   ".dimmed());
    println!("0..{}", map.max_depth());
    println!();

    // Run boundaries fall on node boundaries, so every slice below is
    // valid UTF-8.
    for run in map.runs() {
        let text = &source[run.start..run.end];
        if run.depth == 0 {
            print!("{}", text);
        } else {
            print!("{}", text.color(tint(run.depth)));
        }
    }
    if !source.ends_with('\n') {
        println!();
    }
}

/// Report a file that failed to parse.
pub fn write_parse_failure(path: &str, error: &str) {
    eprintln!("  {} {}: {}", "✗".red().bold(), path, error);
}
