//! scriptdoc — generate markdown documentation from `# @doc` blocks in shell
//! scripts.
//!
//! The pipeline is scan → render → write:
//!
//! - [`scan::scan`] walks a directory and parses every `.sh` file's block
//!   into a [`model::FieldMap`], collected in a [`model::DocSet`]
//! - [`render`] turns the DocSet into `components.md`, `index.md`, one page
//!   per top-level directory and a MkDocs navigation suggestion
//! - [`output`] writes those files atomically
//!
//! [`serve`] and [`watch`] wrap the pipeline in a local preview server that
//! can regenerate on change.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod render;
pub mod scan;
pub mod serve;
pub mod toc;
pub mod watch;

pub use error::{Error, Result};
pub use model::{DocSet, FieldMap};

use render::RenderOptions;
use std::path::PathBuf;
use tracing::info;

/// Inputs of one regeneration run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub render: RenderOptions,
}

impl From<&config::Config> for GenerateOptions {
    fn from(config: &config::Config) -> Self {
        Self {
            input: config.input.clone(),
            output: config.output.clone(),
            render: config.render_options(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Documented scripts, relative to the input directory, sorted
    pub scripts: Vec<String>,
    /// Files written, in write order
    pub files: Vec<PathBuf>,
}

/// Scan, render and write the whole documentation set.
///
/// Nothing is written when no script is documented; that case is reported
/// as [`Error::NothingToDocument`].
pub fn generate(options: &GenerateOptions) -> Result<Report> {
    let docs = scan::scan(&options.input)?;
    if docs.is_empty() {
        return Err(Error::NothingToDocument {
            input: options.input.clone(),
        });
    }

    let planned = output::plan(&docs, &options.render);
    let files = output::write_all(&options.output, &planned)?;
    info!(
        scripts = docs.len(),
        output = %options.output.display(),
        "documentation generated"
    );

    Ok(Report {
        scripts: docs.paths().map(String::from).collect(),
        files,
    })
}
