//! Render `components.md`, every script grouped by category.

use super::{base_name, push_code_block};
use crate::model::{DocSet, FieldMap};
use crate::toc;

/// Render the combined, categorized document.
pub fn render_combined(docs: &DocSet) -> String {
    let categories = docs.by_category();

    let mut out = String::new();
    out.push_str("# Component Documentation\n\n");
    out.push_str("Auto-generated documentation from script docstrings.\n\n");

    out.push_str("## Table of Contents\n\n");
    for category in categories.keys() {
        out.push_str(&toc::render_toc_item(category));
        out.push('\n');
    }
    out.push('\n');

    for (category, scripts) in &categories {
        out.push_str(&format!("## {}\n\n", category));
        for (path, fields) in scripts {
            out.push_str(&render_script_section(path, fields));
            out.push_str("\n---\n\n");
        }
    }

    out
}

/// Render one script's subsection.
///
/// Only fields that are present produce output, always in the same order.
pub fn render_script_section(path: &str, fields: &FieldMap) -> String {
    let mut out = String::new();

    let name = fields.name().unwrap_or_else(|| base_name(path));
    out.push_str(&format!("### {}\n\n", name));

    if let Some(description) = fields.get("description") {
        out.push_str(description);
        out.push_str("\n\n");
    }

    out.push_str(&format!("**File:** `{}`\n\n", path));

    if let Some(requires) = fields.get("requires") {
        out.push_str(&format!("**Requirements:** {}\n\n", requires));
    }
    if let Some(usage) = fields.get("usage") {
        push_code_block(&mut out, "Usage", usage);
    }
    if let Some(example) = fields.get("example") {
        push_code_block(&mut out, "Example", example);
    }
    if let Some(notes) = fields.get("notes") {
        out.push_str(&format!("**Notes:** {}\n\n", notes));
    }

    let mut version_info = Vec::new();
    if let Some(version) = fields.get("version") {
        version_info.push(format!("Version: {}", version));
    }
    if let Some(author) = fields.get("author") {
        version_info.push(format!("Author: {}", author));
    }
    if !version_info.is_empty() {
        out.push_str(&format!("*{}*\n\n", version_info.join(" | ")));
    }

    out
}
