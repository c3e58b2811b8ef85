//! Optional `scriptdoc.toml` configuration.
//!
//! Every key has a default; command-line flags override file values.

use crate::error::{Error, Result};
use crate::render::{RenderOptions, DEFAULT_INSTALL_BASE_URL, DEFAULT_TITLE};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "scriptdoc.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory scanned for scripts
    pub input: PathBuf,
    /// Directory the markdown pages are written to
    pub output: PathBuf,
    /// Title of the index page
    pub title: String,
    /// Prefix of the install command URL
    pub install_base_url: String,
    pub serve: ServeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("MacOS/Components"),
            output: PathBuf::from("docs/generated"),
            title: DEFAULT_TITLE.to_string(),
            install_base_url: DEFAULT_INSTALL_BASE_URL.to_string(),
            serve: ServeConfig::default(),
        }
    }
}

/// `[serve]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    pub port: u16,
    /// Minimum number of seconds between two regenerations
    pub throttle_secs: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            throttle_secs: 2,
        }
    }
}

impl ServeConfig {
    pub fn throttle(&self) -> Duration {
        Duration::from_secs(self.throttle_secs)
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `scriptdoc.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = Path::new(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::from_file(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            title: self.title.clone(),
            install_base_url: self.install_base_url.clone(),
        }
    }
}
