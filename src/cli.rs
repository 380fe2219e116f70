//! Command-line interface for depthtint.

use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analysis::compute_depths;
use crate::parser::Dialect;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directories never worth descending into.
const SKIP_DIRS: &[&str] = &["node_modules", "vendor", "dist", "build"];

/// Tint source code by lexical scope depth.
///
/// depthtint parses JavaScript/TypeScript sources, computes the scope
/// nesting depth of every byte offset, and renders the result either as
/// depth-colored source or as JSON depth arrays.
#[derive(Parser)]
#[command(name = "depthtint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Force a dialect: js, ts, or tsx (default: by file extension)
    #[arg(short, long)]
    pub dialect: Option<String>,
}

/// Collect analyzable files under a directory.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories
            if e.file_type().is_dir() && name.starts_with('.') {
                return false;
            }
            if e.file_type().is_dir() && SKIP_DIRS.contains(&name.as_ref()) {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if Dialect::for_extension(ext).is_some() {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Run the analysis over the requested path.
pub fn run(args: &Cli) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    // Validate dialect override
    let forced_dialect = match &args.dialect {
        Some(name) => match Dialect::from_name(name) {
            Some(d) => Some(d),
            None => {
                eprintln!(
                    "Error: invalid dialect {:?}, must be one of 'js', 'javascript', 'ts', 'typescript', 'tsx', 'jsx'",
                    name
                );
                return Ok(EXIT_ERROR);
            }
        },
        None => None,
    };

    // Check path exists
    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    // Collect files to analyze
    let files = if metadata.is_dir() {
        collect_files(&args.path)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let mut failed = 0usize;
    let mut json_files = Vec::new();

    for file in &files {
        let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("");
        let dialect = match forced_dialect.or_else(|| Dialect::for_extension(ext)) {
            Some(d) => d,
            None => {
                eprintln!("Error: cannot infer dialect for {:?}; pass --dialect", file);
                failed += 1;
                continue;
            }
        };

        let source = match std::fs::read_to_string(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: cannot read {:?}: {}", file, e);
                failed += 1;
                continue;
            }
        };

        let path_str = file.to_string_lossy().to_string();
        match compute_depths(&source, dialect) {
            Ok(map) => {
                if args.format == "json" {
                    json_files.push(report::JsonFileDepths::ok(&path_str, dialect, &map));
                } else {
                    report::write_pretty(&path_str, dialect, &source, &map);
                }
            }
            Err(e) => {
                failed += 1;
                if args.format == "json" {
                    json_files.push(report::JsonFileDepths::failed(
                        &path_str,
                        dialect,
                        &e.to_string(),
                    ));
                } else {
                    report::write_parse_failure(&path_str, &e.to_string());
                }
            }
        }
    }

    if args.format == "json" {
        report::write_json(json_files)?;
    }

    if failed > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
