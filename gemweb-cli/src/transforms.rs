//! CLI-specific transforms
//!
//! This module defines all the transform combinations available to `inspect`.
//! Each transform is a stage + format combination (e.g., "lines-json", "blocks-treeviz").
//!
//! ## Transform Pipeline
//!
//! Conversion goes through two stages worth looking at:
//!
//! 1. **Classification** - Raw text → line events
//!    - `lines-json`: every event with its line number
//!    - `lines-simple`: one `<line> <kind>` row per line
//!
//! 2. **Block building** - line events → Document
//!    - `blocks-json`: JSON representation of the document
//!    - `blocks-treeviz`: Tree visualization with Unicode icons
//!
//! Extra parameters are accepted and ignored, so the same `--extra-*` flags
//! can be passed to `inspect` and `convert`.

use gemweb_babel::formats::gemtext::parser::parse_lines;
use gemweb_babel::formats::treeviz::to_treeviz_str;
use gemweb_babel::ir::events::SourceLine;
use gemweb_babel::to_document;
use std::collections::HashMap;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] =
    &["lines-json", "lines-simple", "blocks-json", "blocks-treeviz"];

/// Transform used when `inspect` is given none
pub const DEFAULT_TRANSFORM: &str = "blocks-treeviz";

/// Execute a named transform on a source file
///
/// Returns the transformed output, always newline terminated, or an error message.
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform("# Title\n", "lines-simple", &HashMap::new())?;
/// assert_eq!(output, "   1 heading\n");
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    _extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    match transform_name {
        "lines-json" => {
            let lines = collect_lines(source)?;
            to_json(&lines)
        }
        "lines-simple" => {
            let lines = collect_lines(source)?;
            Ok(lines_to_simple(&lines))
        }
        "blocks-json" => {
            let doc = to_document(source).map_err(|e| format!("Transform failed: {e}"))?;
            to_json(&doc)
        }
        "blocks-treeviz" => {
            let doc = to_document(source).map_err(|e| format!("Transform failed: {e}"))?;
            Ok(to_treeviz_str(&doc))
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn collect_lines(source: &str) -> Result<Vec<SourceLine>, String> {
    parse_lines(source)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Transform failed: {e}"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    json.push('\n');
    Ok(json)
}

fn lines_to_simple(lines: &[SourceLine]) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&format!("{:>4} {}\n", line.line, line.event.kind()));
    }
    output
}
