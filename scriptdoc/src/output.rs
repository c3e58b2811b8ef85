//! Output planning and atomic file writes.

use crate::error::{Error, Result};
use crate::model::DocSet;
use crate::render::{self, grouped::group_file_name, RenderOptions};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

pub use crate::render::{COMPONENTS_FILE, INDEX_FILE, NAV_FILE};

/// A rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub contents: String,
}

impl OutputFile {
    fn new(name: impl Into<String>, contents: String) -> Self {
        Self {
            name: name.into(),
            contents,
        }
    }
}

/// Render every output file for a DocSet.
///
/// Group pages come first. Groups left out by [`render::page_groups`]
/// (file name taken by a fixed page or by another group differing only in
/// case) are logged here; their scripts still appear in `components.md`.
pub fn plan(docs: &DocSet, options: &RenderOptions) -> Vec<OutputFile> {
    let grouped = render::render_grouped(docs, options);

    for group in docs.by_directory().keys() {
        if !grouped.pages.contains_key(group) {
            warn!(
                group = %group,
                file = %group_file_name(group),
                "group page name already in use, skipping"
            );
        }
    }

    let mut files: Vec<OutputFile> = grouped
        .pages
        .into_iter()
        .map(|(group, page)| OutputFile::new(group_file_name(&group), page))
        .collect();

    files.push(OutputFile::new(NAV_FILE, grouped.nav));
    files.push(OutputFile::new(COMPONENTS_FILE, render::render_combined(docs)));
    files.push(OutputFile::new(INDEX_FILE, render::render_index(docs, options)));
    files
}

/// Write all files into `dir`, creating it if needed.
///
/// Each file is written to a temporary sibling and renamed into place, so
/// a concurrent reader sees either the old or the new contents.
pub fn write_all(dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    files
        .iter()
        .map(|file| -> Result<PathBuf> {
            let path = dir.join(&file.name);
            write_atomic(&path, &file.contents).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            Ok(path)
        })
        .collect()
}

fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
