//! Command implementations for the pokedex CLI
//!
//! This module contains the command dispatch logic. Each command family is
//! implemented in its own module:
//! - `lookup`: name, number and type lookups plus catalogue listings
//! - `load`: explicit store rebuilds and store status
//! - `shared`: logging, configuration and store preparation

pub mod load;
pub mod lookup;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::{Context, Result};
use colored::control;

/// Main command runner for the pokedex
///
/// Resolves configuration, prepares the store and dispatches to the
/// subcommand. Results are written to stdout; diagnostics go to stderr.
pub fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        anyhow::bail!("no command given, run with --help for usage");
    };
    let global = args.global;

    shared::setup_logging(&global)?;
    if global.no_color {
        control::set_override(false);
    }

    match command {
        Commands::Load => {
            let config = shared::load_configuration(&global, true)?;
            load::run_load(&config, global.quiet).with_context(|| {
                format!(
                    "Failed to load species from {}",
                    config.source_path.display()
                )
            })
        }
        Commands::Status => {
            let config = shared::load_configuration(&global, false)?;
            let status = load::store_status(&config)?;
            print!("{}", load::render_status(&status, global.format)?);
            Ok(())
        }
        lookup_command => {
            let config = shared::load_configuration(&global, false)?;
            let (store, stats) = shared::prepare_store(&config).with_context(|| {
                format!(
                    "Failed to prepare species store from {}",
                    config.source_path.display()
                )
            })?;

            if let Some(stats) = &stats {
                if !global.quiet {
                    shared::report_load(stats, &config);
                }
            }

            let output = lookup::execute_lookup(&store, &lookup_command, global.format)?;
            print!("{}", output);
            Ok(())
        }
    }
}
