//! Documentation block extraction.

pub mod block;

pub use block::extract_fields;

use crate::error::{Error, Result};
use crate::model::{FieldMap, FILE_PATH};
use std::fs;
use std::path::Path;

/// Read a script and extract its documentation block.
///
/// `Ok(None)` means the script is undocumented. The returned map carries the
/// script's path under `file_path`.
pub fn extract_file(path: &Path) -> Result<Option<FieldMap>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(extract_fields(&content).map(|mut fields| {
        fields.insert(FILE_PATH, path.display().to_string());
        fields
    }))
}
