//! Per-directory pages and the MkDocs navigation suggestion.

use super::{base_name, push_code_block, RenderOptions, RESERVED_PAGES};
use crate::model::{DocSet, FieldMap};
use crate::scan::SCRIPT_EXTENSION;
use std::collections::{BTreeMap, BTreeSet};

/// Output of [`render_grouped`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouped {
    /// Display group name → page markdown
    pub pages: BTreeMap<String, String>,
    /// Navigation structure for an external MkDocs config
    pub nav: String,
}

/// Directory groups that get a page of their own, keyed by display name.
///
/// A group is left out when its file name is one of the fixed pages, or was
/// already claimed by an earlier group differing only in case. The group
/// pages, the navigation document and the index all go through this.
pub fn page_groups(docs: &DocSet) -> BTreeMap<String, Vec<(&str, &FieldMap)>> {
    let mut taken: BTreeSet<String> = RESERVED_PAGES.iter().map(|p| p.to_string()).collect();
    docs.by_directory()
        .into_iter()
        .filter(|(group, _)| taken.insert(group_file_name(group)))
        .collect()
}

/// Render one page per top-level directory plus the navigation document.
pub fn render_grouped(docs: &DocSet, options: &RenderOptions) -> Grouped {
    let groups = page_groups(docs);

    let pages = groups
        .iter()
        .map(|(group, scripts)| (group.clone(), render_group_page(group, scripts, options)))
        .collect();

    Grouped {
        pages,
        nav: render_nav(groups.keys().map(String::as_str)),
    }
}

/// File name a group page is written to.
pub fn group_file_name(group: &str) -> String {
    format!("{}.md", group.to_lowercase())
}

/// Command that downloads and runs a script straight from the repository.
pub fn install_command(path: &str, options: &RenderOptions) -> String {
    let url = format!("{}/{}", options.install_base_url.trim_end_matches('/'), path);
    format!("/bin/bash -c \"$(curl -fsSL {})\"", url)
}

fn render_group_page(group: &str, scripts: &[(&str, &FieldMap)], options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {} Components\n\n", group));
    out.push_str(&format!("Documentation for {} installation scripts.\n\n", group));

    for (path, fields) in scripts {
        let name = fields.name().unwrap_or_else(|| script_stem(path));
        out.push_str(&format!("## {}\n\n", name));

        if let Some(description) = fields.get("description") {
            out.push_str(&format!("**Description:** {}\n\n", description));
        }
        if let Some(usage) = fields.get("usage") {
            push_code_block(&mut out, "Usage", usage);
        }
        if let Some(requires) = fields.get("requires") {
            out.push_str(&format!("**Requirements:** {}\n\n", requires));
        }
        if let Some(notes) = fields.get("notes") {
            out.push_str(&format!("**Notes:** {}\n\n", notes));
        }

        push_code_block(&mut out, "Installation", &install_command(path, options));
        out.push_str("---\n\n");
    }

    out
}

fn render_nav<'a>(groups: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    out.push_str("# Suggested MkDocs navigation structure:\n");
    out.push_str("nav:\n");
    out.push_str("  - Home: index.md\n");
    out.push_str("  - MacOS:\n");
    for group in groups {
        out.push_str(&format!("    - {}: generated/{}\n", group, group_file_name(group)));
    }
    out.push_str("  - Windows:\n");
    out.push_str("    - Components: windows/components/index.md\n");
    out
}

/// "Python/install.sh" → "install"
fn script_stem(path: &str) -> &str {
    let name = base_name(path);
    name.strip_suffix(SCRIPT_EXTENSION)
        .and_then(|n| n.strip_suffix('.'))
        .unwrap_or(name)
}
