//! scriptdoc-serve — preview the generated documentation over HTTP.
//!
//! `scriptdoc-serve -r -w` regenerates once, then again whenever a script
//! under the input directory changes.

use anyhow::{Context, Result};
use clap::Parser;
use scriptdoc::config::Config;
use scriptdoc::{logging, serve, watch, GenerateOptions};
use std::fs;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "scriptdoc-serve",
    about = "Serve the generated script documentation locally"
)]
struct Cli {
    /// Port to listen on [default: 8000]
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Directory with the generated pages [default: docs/generated]
    #[arg(short = 'd', long)]
    docs_dir: Option<PathBuf>,

    /// Directory scanned for .sh files [default: MacOS/Components]
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Regenerate the pages when a script changes
    #[arg(short = 'w', long)]
    watch: bool,

    /// Regenerate the pages before serving
    #[arg(short = 'r', long)]
    regenerate: bool,

    /// Log at debug level
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Configuration file (defaults to ./scriptdoc.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config =
            Config::load(self.config.as_deref()).context("failed to load configuration")?;
        if let Some(port) = self.port {
            config.serve.port = port;
        }
        if let Some(docs_dir) = &self.docs_dir {
            config.output = docs_dir.clone();
        }
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = cli.config()?;
    let options = GenerateOptions::from(&config);

    if cli.regenerate {
        let report = scriptdoc::generate(&options).context("failed to generate documentation")?;
        info!(scripts = report.scripts.len(), "documentation regenerated");
    }

    fs::create_dir_all(&config.output).with_context(|| {
        format!("failed to create docs directory: {}", config.output.display())
    })?;

    // Dropping the watcher stops it, so it lives until the server returns
    let _watcher = if cli.watch {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher = watch::watch(&config.input, tx).with_context(|| {
            format!("failed to watch {}", config.input.display())
        })?;
        tokio::spawn(watch::regenerate_loop(rx, options, config.serve.throttle()));
        Some(watcher)
    } else {
        None
    };

    println!(
        "Serving documentation at http://localhost:{} (Ctrl+C to stop)",
        config.serve.port
    );
    serve::serve(config.output.clone(), &config.title, config.serve.port)
        .await
        .context("documentation server failed")
}
