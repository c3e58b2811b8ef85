//! Render `index.md` with totals, per-category counts and page links.

use super::grouped::{group_file_name, page_groups};
use super::RenderOptions;
use crate::model::DocSet;

/// Render the summary page.
pub fn render_index(docs: &DocSet, options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", options.title));
    out.push_str(
        "This documentation is automatically generated from docstrings in the shell scripts.\n\n",
    );

    out.push_str(&format!("**Total Scripts:** {}\n\n", docs.len()));
    out.push_str("**Categories:**\n");
    for (category, scripts) in docs.by_category() {
        out.push_str(&format!("- {}: {}\n", category, script_count(scripts.len())));
    }
    out.push('\n');

    out.push_str("## Documentation Pages\n\n");
    out.push_str(
        "- [Components Documentation](components.md) - Detailed documentation for all components\n",
    );
    for (group, scripts) in page_groups(docs) {
        out.push_str(&format!(
            "- [{} Components]({}) - {}\n",
            group,
            group_file_name(&group),
            script_count(scripts.len())
        ));
    }
    out.push('\n');

    out
}

/// "1 script", "2 scripts"
fn script_count(count: usize) -> String {
    if count == 1 {
        "1 script".to_string()
    } else {
        format!("{} scripts", count)
    }
}
