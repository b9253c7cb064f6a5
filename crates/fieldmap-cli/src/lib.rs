//! # fieldmap-cli
//!
//! The `fieldmap` binary: inspect field configurations and resolve
//! resources against them without a running indexer.
//!
//! - `fieldmap fields [config.toml]`: list fields, flags, and mappings
//! - `fieldmap resolve <config.toml> <fixture.json> [--path <root path>]`:
//!   print the index fields of fixture resources as JSON
//! - `fieldmap schema [config.toml]`: print the derived engine schema

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use config::FieldmapConfig;
pub use error::{Error, Result};

/// Run a parsed command line and return what should be printed.
pub fn run(cli: &Cli) -> Result<String> {
    let settings = FieldmapConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Fields { configuration } => {
            let configuration =
                commands::load_field_configuration(configuration.as_deref(), &settings)?;
            Ok(commands::cmd_fields(&configuration))
        }
        Command::Resolve {
            configuration,
            fixture,
            path,
        } => {
            let configuration =
                commands::load_field_configuration(Some(configuration), &settings)?;
            commands::cmd_resolve(&configuration, fixture, path.as_deref(), &settings)
        }
        Command::Schema { configuration } => {
            let configuration =
                commands::load_field_configuration(configuration.as_deref(), &settings)?;
            commands::cmd_schema(&configuration)
        }
    }
}
