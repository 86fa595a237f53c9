//! Species record parsing from CSV data
//!
//! This module maps the source header to column positions and turns each
//! data row into a validated `SpeciesRecord`. Row numbers are 1-based file
//! line numbers so the header is row 1 and the first species is row 2.

use crate::app::models::{ElementalType, SpeciesRecord};
use crate::constants::{MISSING_VALUE_MARKERS, columns};
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;
use std::str::FromStr;

/// Positions of the species columns within a source row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub number: usize,
    pub height: usize,
    pub weight: usize,
    pub type_primary: usize,
    pub type_secondary: usize,
    pub generation: usize,
    pub image_url: Option<usize>,
    pub evolves_from: Option<usize>,
}

impl ColumnMap {
    /// Build the column map from a header row
    ///
    /// Header names are matched case-insensitively after trimming, so column
    /// order in the source file does not matter. Extra columns are ignored.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.trim().to_lowercase(), i))
            .collect();

        let missing: Vec<&str> = columns::REQUIRED
            .iter()
            .copied()
            .filter(|column| !index.contains_key(*column))
            .collect();

        if !missing.is_empty() {
            return Err(Error::malformed_record(
                1,
                format!("header is missing required columns: {}", missing.join(", ")),
            ));
        }

        let required = |column: &str| index[column];

        Ok(Self {
            name: required(columns::NAME),
            number: required(columns::NUMBER),
            height: required(columns::HEIGHT),
            weight: required(columns::WEIGHT),
            type_primary: required(columns::TYPE_PRIMARY),
            type_secondary: required(columns::TYPE_SECONDARY),
            generation: required(columns::GENERATION),
            image_url: index.get(columns::IMAGE_URL).copied(),
            evolves_from: index.get(columns::EVOLVES_FROM).copied(),
        })
    }
}

/// Parse one data row into a validated species record
///
/// Any parse or validation failure is reported as `MalformedRecord` carrying
/// `row`.
pub fn parse_species_row(
    record: &StringRecord,
    columns: &ColumnMap,
    row: usize,
) -> Result<SpeciesRecord> {
    let field = |index: usize, column: &'static str| required_field(record, index, column, row);

    let optional = |index: Option<usize>| -> Option<&str> {
        index
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|value| !is_missing(value))
    };

    let name = field(columns.name, columns::NAME)?;
    if name.is_empty() {
        return Err(Error::malformed_record(row, "species name is empty"));
    }

    let number: u32 = parse_number(field(columns.number, columns::NUMBER)?, columns::NUMBER, row)?;
    let height_m: f64 = parse_number(field(columns.height, columns::HEIGHT)?, columns::HEIGHT, row)?;
    let weight_kg: f64 = parse_number(field(columns.weight, columns::WEIGHT)?, columns::WEIGHT, row)?;
    let generation: u32 = parse_number(
        field(columns.generation, columns::GENERATION)?,
        columns::GENERATION,
        row,
    )?;

    let type_primary: ElementalType = field(columns.type_primary, columns::TYPE_PRIMARY)?
        .parse()
        .map_err(|e: Error| e.at_row(row))?;

    let type_secondary = {
        let raw = field(columns.type_secondary, columns::TYPE_SECONDARY)?;
        if is_missing(raw) {
            None
        } else {
            Some(raw.parse::<ElementalType>().map_err(|e| e.at_row(row))?)
        }
    };

    let image_url = optional(columns.image_url).map(str::to_string);

    let evolves_from = optional(columns.evolves_from)
        .map(|value| parse_species_reference(value, row))
        .transpose()?;

    SpeciesRecord::new(
        number,
        name.to_string(),
        height_m,
        weight_kg,
        type_primary,
        type_secondary,
        generation,
        image_url,
        evolves_from,
    )
    .map_err(|e| e.at_row(row))
}

/// Whether a cell denotes an absent optional value
pub fn is_missing(value: &str) -> bool {
    let value = value.trim();
    MISSING_VALUE_MARKERS
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(value))
}

fn required_field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| Error::malformed_record(row, format!("missing field '{}'", column)))
}

/// Parse a species reference, accepting float-formatted integers such as `1.0`
fn parse_species_reference(value: &str, row: usize) -> Result<u32> {
    if let Ok(number) = value.parse::<u32>() {
        return Ok(number);
    }

    match value.parse::<f64>() {
        Ok(number) if number.fract() == 0.0 && number >= 1.0 && number <= u32::MAX as f64 => {
            Ok(number as u32)
        }
        _ => Err(Error::malformed_record(
            row,
            format!(
                "column '{}' has invalid species number '{}'",
                columns::EVOLVES_FROM,
                value
            ),
        )),
    }
}

fn parse_number<T: FromStr>(value: &str, column: &str, row: usize) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        Error::malformed_record(
            row,
            format!("column '{}' has invalid numeric value '{}'", column, value),
        )
    })
}
