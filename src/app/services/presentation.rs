//! Result formatting for display
//!
//! Renders species records and catalogue listings as human-readable text,
//! pretty JSON or CSV. Every format carries the same seven fields, and an
//! absent secondary type is always written as an explicit `none`.

use crate::app::models::SpeciesRecord;
use crate::constants::NONE_MARKER;
use crate::{Error, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;

/// Output formats for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum OutputFormat {
    /// Human-readable labelled fields
    #[default]
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// The seven displayed fields of a species record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesView {
    pub name: String,
    pub number: u32,
    pub height: f64,
    pub weight: f64,
    pub type_1: String,
    pub type_2: String,
    pub generation: u32,
}

impl From<&SpeciesRecord> for SpeciesView {
    fn from(record: &SpeciesRecord) -> Self {
        Self {
            name: record.name.clone(),
            number: record.number,
            height: record.height_m,
            weight: record.weight_kg,
            type_1: record.type_primary.to_string(),
            type_2: record
                .type_secondary
                .map(|t| t.to_string())
                .unwrap_or_else(|| NONE_MARKER.to_string()),
            generation: record.generation,
        }
    }
}

/// Render a single record
pub fn render_record(record: &SpeciesRecord, format: OutputFormat) -> Result<String> {
    let view = SpeciesView::from(record);
    match format {
        OutputFormat::Human => Ok(human_block(&view)),
        OutputFormat::Json => to_json(&view),
        OutputFormat::Csv => to_csv(std::slice::from_ref(&view)),
    }
}

/// Render a sequence of records
///
/// An empty sequence renders as an explicit message in human format, an
/// empty array in JSON, and a header-only table in CSV.
pub fn render_records(records: &[SpeciesRecord], format: OutputFormat) -> Result<String> {
    let views: Vec<SpeciesView> = records.iter().map(SpeciesView::from).collect();
    match format {
        OutputFormat::Human if views.is_empty() => Ok("No species found.\n".to_string()),
        OutputFormat::Human => Ok(views
            .iter()
            .map(human_block)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => to_json(&views),
        OutputFormat::Csv => to_csv(&views),
    }
}

/// Render a listing of names, numbers or types, one entry per line
pub fn render_listing<T: Display + Serialize>(
    items: &[T],
    heading: &str,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&items),
        OutputFormat::Human | OutputFormat::Csv => {
            let mut out = String::new();
            if format == OutputFormat::Csv {
                out.push_str(heading);
                out.push('\n');
            }
            for item in items {
                out.push_str(&item.to_string());
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Format a measurement so whole values keep one decimal place
pub fn format_measure(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn human_block(view: &SpeciesView) -> String {
    format!(
        "Name:       {}\n\
         Number:     {}\n\
         Height:     {} m\n\
         Weight:     {} kg\n\
         Type 1:     {}\n\
         Type 2:     {}\n\
         Generation: {}\n",
        view.name,
        view.number,
        format_measure(view.height),
        format_measure(view.weight),
        view.type_1,
        view.type_2,
        view.generation
    )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| Error::output(format!("JSON serialization failed: {}", e)))
}

fn to_csv(views: &[SpeciesView]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record([
            "name",
            "number",
            "height",
            "weight",
            "type_1",
            "type_2",
            "generation",
        ])
        .map_err(|e| Error::output(format!("CSV header write failed: {}", e)))?;

    for view in views {
        writer
            .serialize(view)
            .map_err(|e| Error::output(format!("CSV row write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::output(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::output(format!("CSV output not UTF-8: {}", e)))
}
