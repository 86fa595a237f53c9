//! Species loader service
//!
//! This module reads the species CSV file, validates every row, and writes
//! the resulting records into the store in a single transaction. In strict
//! mode the first malformed row aborts the load before anything is written;
//! in lenient mode malformed rows are skipped and reported in `LoadStats`.

use crate::app::models::SpeciesRecord;
use crate::app::services::species_store::{SpeciesStore, name_key};
use crate::config::{Config, LoadMode, ReloadPolicy};
use crate::constants::FIRST_DATA_ROW;
use crate::{Error, Result};
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use parser::{ColumnMap, parse_species_row};
pub use stats::LoadStats;

/// Reads a species source file and populates a store from it
#[derive(Debug, Clone)]
pub struct SpeciesLoader {
    source_path: PathBuf,
    delimiter: u8,
    load_mode: LoadMode,
    show_progress: bool,
}

impl SpeciesLoader {
    /// Create a strict, comma-delimited loader for the given source file
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            delimiter: b',',
            load_mode: LoadMode::Strict,
            show_progress: false,
        }
    }

    /// Create a loader from resolved configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.source_path.clone())
            .with_delimiter(config.delimiter_byte())
            .with_load_mode(config.load_mode)
            .with_progress(config.show_progress)
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_load_mode(mut self, load_mode: LoadMode) -> Self {
        self.load_mode = load_mode;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Parse and validate the source file, then replace the store contents
    ///
    /// The store is only touched once every row has been accepted (strict)
    /// or triaged (lenient), and the replacement itself is transactional, so
    /// a failed load leaves the previous contents intact.
    pub fn load_into(&self, store: &mut SpeciesStore) -> Result<LoadStats> {
        let start_time = Instant::now();
        info!(
            "Loading species from {} ({:?} mode)",
            self.source_path.display(),
            self.load_mode
        );

        let (records, mut stats) = self.parse_source()?;
        let source_label = self.source_path.display().to_string();
        stats.records_loaded = store.replace_all(&records, &source_label)?;
        stats.load_duration = start_time.elapsed();

        info!("{}", stats.summary());
        Ok(stats)
    }

    /// Parse and validate the configured source file without writing anything
    pub fn parse_source(&self) -> Result<(Vec<SpeciesRecord>, LoadStats)> {
        let path_label = self.source_path.display().to_string();

        if !self.source_path.is_file() {
            return Err(Error::store_unavailable(
                path_label,
                "source file does not exist",
            ));
        }

        let file = File::open(&self.source_path).map_err(|e| {
            Error::store_unavailable(path_label, format!("cannot open source file: {}", e))
        })?;

        self.parse_reader(file)
    }

    /// Parse and validate species rows from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<(Vec<SpeciesRecord>, LoadStats)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(e, 1))?
            .clone();
        let columns = ColumnMap::from_headers(&headers)?;
        debug!("Source column map: {:?}", columns);

        let progress_bar = self.progress_bar();
        let mut stats = LoadStats::new();
        let mut records = Vec::new();
        let mut seen_numbers = HashSet::new();
        let mut seen_names = HashSet::new();

        for (index, result) in reader.records().enumerate() {
            let fallback_row = index + FIRST_DATA_ROW;
            stats.rows_read += 1;
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }

            let outcome = result.map_err(|e| csv_error(e, fallback_row)).and_then(|record| {
                let row = record_row(&record, fallback_row);
                let species = parse_species_row(&record, &columns, row)?;
                check_unique(&species, row, &seen_numbers, &seen_names)?;
                Ok(species)
            });

            match outcome {
                Ok(species) => {
                    seen_numbers.insert(species.number);
                    seen_names.insert(name_key(&species.name));
                    records.push(species);
                }
                Err(error @ Error::MalformedRecord { .. })
                    if self.load_mode == LoadMode::Lenient =>
                {
                    warn!("Skipping row: {}", error);
                    stats.rows_skipped += 1;
                    stats.errors.push(error.to_string());
                }
                Err(error) => {
                    if let Some(pb) = &progress_bar {
                        pb.abandon();
                    }
                    return Err(error);
                }
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        debug!(
            "Parsed {} records from {} rows ({} skipped)",
            records.len(),
            stats.rows_read,
            stats.rows_skipped
        );
        Ok((records, stats))
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} rows {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Loading species...");
        Some(pb)
    }
}

/// Load the store from the configured source when the reload policy asks for it
///
/// Returns the load statistics when a load happened, or `None` when the
/// existing store contents were kept.
pub fn ensure_loaded(store: &mut SpeciesStore, config: &Config) -> Result<Option<LoadStats>> {
    let needs_load = match config.reload_policy {
        ReloadPolicy::Always => true,
        ReloadPolicy::IfEmpty => !store.is_populated()?,
    };

    if !needs_load {
        debug!("Store already populated, skipping load");
        return Ok(None);
    }

    SpeciesLoader::from_config(config).load_into(store).map(Some)
}

/// File line of a parsed record, falling back to the row counter
fn record_row(record: &StringRecord, fallback_row: usize) -> usize {
    record
        .position()
        .map(|position| position.line() as usize)
        .unwrap_or(fallback_row)
}

/// Reject a record whose number or name was already accepted
fn check_unique(
    species: &SpeciesRecord,
    row: usize,
    seen_numbers: &HashSet<u32>,
    seen_names: &HashSet<String>,
) -> Result<()> {
    if seen_numbers.contains(&species.number) {
        return Err(Error::malformed_record(
            row,
            format!("duplicate species number {}", species.number),
        ));
    }

    if seen_names.contains(&name_key(&species.name)) {
        return Err(Error::malformed_record(
            row,
            format!("duplicate species name '{}'", species.name),
        ));
    }

    Ok(())
}

/// Convert a CSV reader error into a crate error at the given row
fn csv_error(error: csv::Error, fallback_row: usize) -> Error {
    let row = error
        .position()
        .map(|position| position.line() as usize)
        .unwrap_or(fallback_row);

    let message = error.to_string();

    match error.into_kind() {
        csv::ErrorKind::Io(source) => Error::io("Failed to read species source", source),
        _ => Error::malformed_record(row, message),
    }
}
