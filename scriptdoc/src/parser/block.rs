//! Line-based `# @doc` block parser.
//!
//! A block runs from the first `# @doc` line to the next `# @/doc` line.
//! Inside it, `# @name: value` starts a field; following lines continue the
//! value until the next `# @` line or the end of the block.

use crate::model::FieldMap;
use regex::Regex;
use std::sync::LazyLock;

pub const START_MARKER: &str = "# @doc";
pub const END_MARKER: &str = "# @/doc";

static RE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*# @(\w+):(.*)$").unwrap());

// Any other `# @...` line closes the current field without starting one
static RE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*# @").unwrap());

/// Extract the fields of the first documentation block in `text`.
///
/// Returns `None` when the text has no complete start/end marker pair.
pub fn extract_fields(text: &str) -> Option<FieldMap> {
    let body = find_block(text)?;

    let mut fields = FieldMap::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in body {
        if let Some(caps) = RE_FIELD.captures(line) {
            flush(&mut fields, current.take());
            current = Some((caps[1].to_string(), vec![caps[2].to_string()]));
        } else if RE_ANNOTATION.is_match(line) {
            flush(&mut fields, current.take());
        } else if let Some((_, parts)) = current.as_mut() {
            parts.push(line.to_string());
        }
    }
    flush(&mut fields, current);

    Some(fields)
}

/// Lines strictly between the first start marker and the end marker that
/// follows it.
fn find_block(text: &str) -> Option<Vec<&str>> {
    let mut lines = text.lines();
    lines.by_ref().find(|l| l.trim() == START_MARKER)?;

    let mut body = Vec::new();
    for line in lines {
        if line.trim() == END_MARKER {
            return Some(body);
        }
        body.push(line);
    }
    None
}

fn flush(fields: &mut FieldMap, field: Option<(String, Vec<String>)>) {
    if let Some((name, parts)) = field {
        fields.insert(name, join_continuation(&parts));
    }
}

/// Collapse a wrapped value into one logical line.
///
/// Every line after the first loses its comment prefix and indentation;
/// the pieces are joined with single spaces.
fn join_continuation(parts: &[String]) -> String {
    let mut pieces = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let piece = if i == 0 {
            part.trim()
        } else {
            let stripped = part.trim_start();
            stripped.strip_prefix('#').unwrap_or(stripped).trim()
        };
        if !piece.is_empty() {
            pieces.push(piece);
        }
    }
    pieces.join(" ")
}
