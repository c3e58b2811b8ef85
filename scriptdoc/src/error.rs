//! Error type for the extraction pipeline.
//!
//! The library reports [`Error`]; the binaries wrap it in `anyhow` for
//! context chains.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A script could not be read. The scanner logs these and moves on.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("input directory not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// The scan finished without a single documented script.
    #[error("no documented scripts found in {}", input.display())]
    NothingToDocument { input: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
