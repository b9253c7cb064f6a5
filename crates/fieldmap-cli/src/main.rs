#![forbid(unsafe_code)]

//! fieldmap CLI
//!
//! Command-line interface for fieldmap field configurations.

use anyhow::Result;
use clap::Parser;
use fieldmap_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "Starting fieldmap");

    let output = fieldmap_cli::run(&cli)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
