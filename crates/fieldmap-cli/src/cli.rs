//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect search field configurations and resolve resources against them.
#[derive(Parser, Debug)]
#[command(name = "fieldmap", author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file path
    #[arg(short, long, global = true, env = "FIELDMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the fields of a configuration with their flags and mappings
    Fields {
        /// Field configuration file (defaults to the built-in standard configuration)
        configuration: Option<PathBuf>,
    },

    /// Resolve resources from a JSON fixture and print their index fields
    Resolve {
        /// Field configuration file
        configuration: PathBuf,

        /// JSON fixture with resources, properties, and extraction results
        fixture: PathBuf,

        /// Resolve only this root path (all stored resources otherwise)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Print the search engine schema derived from a configuration
    Schema {
        /// Field configuration file (defaults to the built-in standard configuration)
        configuration: Option<PathBuf>,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "fieldmap",
            "resolve",
            "site.toml",
            "fixture.json",
            "--path",
            "/sites/a.html",
        ])
        .unwrap();
        match cli.command {
            Command::Resolve {
                configuration,
                fixture,
                path,
            } => {
                assert_eq!(configuration, PathBuf::from("site.toml"));
                assert_eq!(fixture, PathBuf::from("fixture.json"));
                assert_eq!(path.as_deref(), Some("/sites/a.html"));
            }
            other => unreachable!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_fields_configuration_optional() {
        let cli = Cli::try_parse_from(["fieldmap", "fields"]).unwrap();
        assert!(matches!(cli.command, Command::Fields { configuration: None }));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["fieldmap", "schema", "--config", "s.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("s.toml")));
    }
}
