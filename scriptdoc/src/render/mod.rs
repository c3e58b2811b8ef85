//! Pure DocSet to markdown renderers.
//!
//! Nothing in here touches the filesystem; [`crate::output`] decides where
//! the rendered text goes.

pub mod combined;
pub mod grouped;
pub mod index;

pub use combined::{render_combined, render_script_section};
pub use grouped::{page_groups, render_grouped, Grouped};
pub use index::render_index;

pub const INDEX_FILE: &str = "index.md";
pub const COMPONENTS_FILE: &str = "components.md";
pub const NAV_FILE: &str = "mkdocs_nav.yml";

/// Fixed pages; a directory group never gets one of these file names.
pub const RESERVED_PAGES: [&str; 3] = [INDEX_FILE, COMPONENTS_FILE, NAV_FILE];

/// Default title of the index page.
pub const DEFAULT_TITLE: &str = "Python Support Scripts Documentation";

/// Default location the install command fetches scripts from.
pub const DEFAULT_INSTALL_BASE_URL: &str =
    "https://raw.githubusercontent.com/dtudk/pythonsupport-scripts/main/MacOS/Components";

/// Knobs shared by the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Title of `index.md`
    pub title: String,
    /// Prefix joined with a script's relative path in install commands
    pub install_base_url: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            install_base_url: DEFAULT_INSTALL_BASE_URL.to_string(),
        }
    }
}

/// Append a labelled fenced bash block.
fn push_code_block(out: &mut String, label: &str, code: &str) {
    out.push_str(&format!("**{}:**\n```bash\n{}\n```\n\n", label, code));
}

/// Last segment of a `/`-separated path.
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
