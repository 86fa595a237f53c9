//! Load and status command implementations

use super::shared::{prepare_store, report_load};
use crate::app::services::presentation::OutputFormat;
use crate::app::services::species_store::{LoadMetadata, SpeciesStore};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Rebuild the store from the configured source
///
/// The caller is expected to have resolved `config` with a forced reload.
pub fn run_load(config: &Config, quiet: bool) -> Result<()> {
    let (_store, stats) = prepare_store(config)?;

    match stats {
        Some(stats) if !quiet => report_load(&stats, config),
        Some(_) => {}
        None => info!("Store already populated, nothing loaded"),
    }
    Ok(())
}

/// Store state reported by the status command
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub store_path: PathBuf,
    pub exists: bool,
    pub record_count: usize,
    pub last_load: Option<LoadMetadata>,
}

/// Inspect the store without loading anything into it
pub fn store_status(config: &Config) -> Result<StoreStatus> {
    if !config.store_path.is_file() {
        return Ok(StoreStatus {
            store_path: config.store_path.clone(),
            exists: false,
            record_count: 0,
            last_load: None,
        });
    }

    let store = SpeciesStore::open(&config.store_path)?;
    let record_count = if store.is_populated()? {
        store.count()?
    } else {
        0
    };

    Ok(StoreStatus {
        store_path: config.store_path.clone(),
        exists: true,
        record_count,
        last_load: store.load_metadata()?,
    })
}

/// Render the store status
pub fn render_status(status: &StoreStatus, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(status)
            .map(|json| json + "\n")
            .map_err(|e| Error::output(format!("JSON serialization failed: {}", e))),
        OutputFormat::Csv => status_csv(status),
        OutputFormat::Human => {
            let mut out = format!(
                "{} {}\n",
                "Store:".bold(),
                status.store_path.display()
            );

            match &status.last_load {
                Some(load) if status.exists => {
                    out.push_str(&format!(
                        "{} {}\n{} {}\n{} {}\n",
                        "Source:".bold(),
                        load.source,
                        "Loaded at:".bold(),
                        load.loaded_at.to_rfc3339(),
                        "Species:".bold(),
                        status.record_count
                    ));
                }
                _ => out.push_str(&format!("{}\n", "not loaded".yellow())),
            }

            Ok(out)
        }
    }
}

/// Header row plus one value row, without colour codes
fn status_csv(status: &StoreStatus) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let (source, loaded_at) = match &status.last_load {
        Some(load) => (load.source.clone(), load.loaded_at.to_rfc3339()),
        None => (String::new(), String::new()),
    };

    writer
        .write_record(["store_path", "exists", "record_count", "source", "loaded_at"])
        .map_err(|e| Error::output(format!("CSV header write failed: {}", e)))?;
    writer
        .write_record([
            status.store_path.display().to_string(),
            status.exists.to_string(),
            status.record_count.to_string(),
            source,
            loaded_at,
        ])
        .map_err(|e| Error::output(format!("CSV row write failed: {}", e)))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::output(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::output(format!("CSV output not UTF-8: {}", e)))
}
