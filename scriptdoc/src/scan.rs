//! Directory scanner: finds shell scripts and collects their docs.

use crate::error::{Error, Result};
use crate::model::DocSet;
use crate::parser;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension of files considered for documentation.
pub const SCRIPT_EXTENSION: &str = "sh";

/// Walk `root` recursively and extract every documented `.sh` script.
///
/// Symlinks are followed, so a linked script is documented under the link's
/// path. Unreadable entries and link loops are logged and skipped; only a
/// missing root fails.
pub fn scan(root: &Path) -> Result<DocSet> {
    if !root.is_dir() {
        return Err(Error::InputNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut docs = DocSet::new();
    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_script(entry.path()) {
            continue;
        }

        let path = entry.path();
        match parser::extract_file(path) {
            Ok(Some(fields)) => {
                let key = relative_key(root, path);
                debug!(script = %key, "documented");
                docs.insert(key, fields);
            }
            Ok(None) => debug!(path = %path.display(), "no @doc block"),
            Err(e) => warn!(error = %e, "skipping script"),
        }
    }

    Ok(docs)
}

fn is_script(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXTENSION)
}

/// Path of `path` below `root`, segments joined with `/` on every platform.
fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
