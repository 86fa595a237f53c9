//! Shared components for CLI commands
//!
//! Logging setup, configuration resolution and store preparation used by
//! every subcommand.

use crate::app::services::species_loader::{LoadStats, ensure_loaded};
use crate::app::services::species_store::SpeciesStore;
use crate::cli::args::GlobalArgs;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &GlobalArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pokedex={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Resolve configuration using the layered approach (defaults -> env -> args)
pub fn load_configuration(args: &GlobalArgs, force_reload: bool) -> Result<Config> {
    args.validate()?;

    let mut config = Config::from_env();
    args.apply_to(&mut config, force_reload)?;

    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Open the store and load it from the source if the reload policy asks for it
pub fn prepare_store(config: &Config) -> Result<(SpeciesStore, Option<LoadStats>)> {
    config.ensure_store_directory()?;

    let mut store = SpeciesStore::open(&config.store_path)?;
    let stats = ensure_loaded(&mut store, config)?;

    if let Some(stats) = &stats {
        info!(
            "Store {} rebuilt from {}",
            config.store_path.display(),
            config.source_path.display()
        );
        debug!("{}", stats.summary());
    }

    Ok((store, stats))
}

/// Print a coloured load summary to stderr
pub fn report_load(stats: &LoadStats, config: &Config) {
    eprintln!(
        "{} {} species from {} in {:.2}s",
        "Loaded".bright_green().bold(),
        stats.records_loaded.to_string().bright_white().bold(),
        config.source_path.display(),
        stats.load_duration.as_secs_f64()
    );

    if stats.has_errors() {
        eprintln!(
            "{} {} malformed rows skipped:",
            "Warning:".yellow().bold(),
            stats.rows_skipped
        );
        for error in &stats.errors {
            eprintln!("  - {}", error);
        }
    }
}
