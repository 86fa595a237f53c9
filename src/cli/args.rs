//! Command-line argument definitions for the pokedex
//!
//! This module defines the CLI interface using the clap derive API: global
//! options controlling where data lives and how results are printed, and one
//! subcommand per lookup mode.

use crate::config::{Config, LoadMode, ReloadPolicy};
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use crate::app::services::presentation::OutputFormat;

/// CLI arguments for the pokedex
///
/// Loads species reference data from a CSV file into a local SQLite store
/// and looks species up by name, number or type.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pokedex",
    version,
    about = "Look up species by name, number or type from a CSV-backed SQLite store",
    long_about = "Loads species reference data from a CSV file into a local SQLite store on \
                  first use, then answers lookups by name, by national number, or by elemental \
                  type. The store is reused on later runs unless --reload is given."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Look up a species by name (case-insensitive)
    Name {
        /// Species name, e.g. pikachu
        name: String,
    },
    /// Look up a species by its national number
    Number {
        /// Positive species number, e.g. 25
        #[arg(allow_hyphen_values = true)]
        number: String,
    },
    /// List every species with the given primary or secondary type
    Type {
        /// Elemental type, e.g. fire
        #[arg(value_name = "TYPE")]
        type_name: String,
    },
    /// List all species names alphabetically
    Names,
    /// List all species numbers in ascending order
    Numbers,
    /// List every type present in the store
    Types,
    /// Rebuild the store from the source file
    Load,
    /// Show where the store lives and when it was loaded
    Status,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// Species CSV file
    ///
    /// Overrides POKEDEX_SOURCE. Defaults to ./pokemon.csv.
    #[arg(
        short = 's',
        long = "source",
        value_name = "FILE",
        global = true,
        help = "Species CSV file to load from"
    )]
    pub source: Option<PathBuf>,

    /// SQLite store file
    ///
    /// Overrides POKEDEX_STORE. Defaults to pokedex/pokedex.db under the user data directory.
    #[arg(
        long = "store",
        value_name = "FILE",
        global = true,
        help = "SQLite store file"
    )]
    pub store: Option<PathBuf>,

    /// Field delimiter used by the source file
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        global = true,
        help = "Field delimiter of the source file (default ',')"
    )]
    pub delimiter: Option<char>,

    /// Skip malformed rows instead of aborting the load
    #[arg(
        long = "lenient",
        global = true,
        help = "Skip malformed source rows with a warning instead of failing"
    )]
    pub lenient: bool,

    /// Rebuild the store even if it is already populated
    #[arg(
        long = "reload",
        global = true,
        help = "Rebuild the store from the source before answering"
    )]
    pub reload: bool,

    /// Output format for results
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Human,
        global = true,
        help = "Output format"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress everything but results and errors
    #[arg(short = 'q', long = "quiet", global = true, help = "Only print results and errors")]
    pub quiet: bool,

    /// Disable coloured output
    #[arg(long = "no-color", global = true, help = "Disable coloured output")]
    pub no_color: bool,
}

impl GlobalArgs {
    /// Get the log level implied by --verbose and --quiet
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Apply these arguments on top of a base configuration
    ///
    /// `force_reload` is set by commands that always rebuild the store.
    pub fn apply_to(&self, config: &mut Config, force_reload: bool) -> Result<()> {
        if let Some(source) = &self.source {
            config.source_path = source.clone();
        }
        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }

        config.load_mode = if self.lenient {
            LoadMode::Lenient
        } else {
            LoadMode::Strict
        };
        config.reload_policy = if self.reload || force_reload {
            ReloadPolicy::Always
        } else {
            ReloadPolicy::IfEmpty
        };
        config.show_progress = !self.quiet;

        config.validate()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<()> {
        if self.quiet && self.verbose > 0 {
            return Err(Error::configuration(
                "--quiet and --verbose cannot be used together",
            ));
        }

        if let Some(source) = &self.source {
            if source.as_os_str().is_empty() {
                return Err(Error::configuration("--source cannot be empty"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_command() {
        let args = Args::try_parse_from(["pokedex", "name", "Pikachu"]).unwrap();
        match args.command {
            Some(Commands::Name { name }) => assert_eq!(name, "Pikachu"),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(args.global.format, OutputFormat::Human);
    }

    #[test]
    fn test_parse_negative_number_is_left_for_validation() {
        let args = Args::try_parse_from(["pokedex", "number", "-1"]).unwrap();
        match args.command {
            Some(Commands::Number { number }) => assert_eq!(number, "-1"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "pokedex",
            "type",
            "fire",
            "--format",
            "json",
            "--source",
            "/tmp/species.csv",
            "--reload",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.global.format, OutputFormat::Json);
        assert_eq!(args.global.source, Some(PathBuf::from("/tmp/species.csv")));
        assert!(args.global.reload);
        assert_eq!(args.global.get_log_level(), "debug");
    }

    #[test]
    fn test_apply_to_config() {
        let args = Args::try_parse_from([
            "pokedex",
            "--store",
            "/tmp/p.db",
            "--delimiter",
            ";",
            "--lenient",
            "names",
        ])
        .unwrap();

        let mut config = Config::default();
        args.global.apply_to(&mut config, false).unwrap();

        assert_eq!(config.store_path, PathBuf::from("/tmp/p.db"));
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.load_mode, LoadMode::Lenient);
        assert_eq!(config.reload_policy, ReloadPolicy::IfEmpty);

        args.global.apply_to(&mut config, true).unwrap();
        assert_eq!(config.reload_policy, ReloadPolicy::Always);
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        let args = Args::try_parse_from(["pokedex", "-q", "-v", "names"]).unwrap();
        assert!(args.global.validate().is_err());
        assert_eq!(args.global.get_log_level(), "error");
    }
}
