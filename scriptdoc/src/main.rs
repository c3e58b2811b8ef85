//! scriptdoc — generate markdown documentation from `# @doc` blocks in shell
//! scripts.
//!
//! `scriptdoc -i MacOS/Components -o docs/generated`

use anyhow::{Context, Result};
use clap::Parser;
use scriptdoc::config::Config;
use scriptdoc::{logging, Error, GenerateOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "scriptdoc",
    about = "Generate markdown documentation from @doc blocks in shell scripts"
)]
struct Cli {
    /// Directory scanned for .sh files [default: MacOS/Components]
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Directory the markdown pages are written to [default: docs/generated]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// List every documented script and log at debug level
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Configuration file (defaults to ./scriptdoc.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<Error>(), Some(Error::NothingToDocument { .. })) => {
            eprintln!("No documented scripts found!");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }

    let options = GenerateOptions::from(&config);
    let report = scriptdoc::generate(&options)?;

    if cli.verbose {
        println!("Found {} documented scripts:", report.scripts.len());
        for script in &report.scripts {
            println!("  {}", script);
        }
    }

    println!("Documentation generated in {}", options.output.display());
    for file in &report.files {
        println!("  {}", file.display());
    }
    Ok(())
}
