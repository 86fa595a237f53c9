//! Application constants for the pokedex
//!
//! This module contains the source file column names, store schema names,
//! default paths and environment variables used throughout the application.

// =============================================================================
// Source File Columns
// =============================================================================

/// Column names expected in the species CSV header
pub mod columns {
    pub const NAME: &str = "pokemon";
    pub const NUMBER: &str = "species_id";
    pub const HEIGHT: &str = "height";
    pub const WEIGHT: &str = "weight";
    pub const TYPE_PRIMARY: &str = "type_1";
    pub const TYPE_SECONDARY: &str = "type_2";
    pub const GENERATION: &str = "generation_id";
    pub const IMAGE_URL: &str = "url_image";
    pub const EVOLVES_FROM: &str = "evolves_from_species_id";

    /// Columns that must be present for a load to start
    pub const REQUIRED: &[&str] = &[
        NAME,
        NUMBER,
        HEIGHT,
        WEIGHT,
        TYPE_PRIMARY,
        TYPE_SECONDARY,
        GENERATION,
    ];
}

/// Cell values treated as an absent optional field
pub const MISSING_VALUE_MARKERS: &[&str] = &["", "na", "nan", "none", "null"];

/// Header occupies the first line of the file, so data rows start at line 2
pub const FIRST_DATA_ROW: usize = 2;

/// Default field delimiter for the source file
pub const DEFAULT_DELIMITER: char = ',';

// =============================================================================
// Store Schema
// =============================================================================

/// Table holding one row per species
pub const SPECIES_TABLE: &str = "pokemon";

/// Single-row table describing the last successful load
pub const LOAD_METADATA_TABLE: &str = "load_metadata";

// =============================================================================
// Paths and Environment
// =============================================================================

/// Application directory name under the user data directory
pub const APP_DIR_NAME: &str = "pokedex";

/// Default store filename
pub const DEFAULT_STORE_FILENAME: &str = "pokedex.db";

/// Default source filename, resolved against the working directory
pub const DEFAULT_SOURCE_FILENAME: &str = "pokemon.csv";

/// Environment variable overriding the source file path
pub const SOURCE_ENV_VAR: &str = "POKEDEX_SOURCE";

/// Environment variable overriding the store file path
pub const STORE_ENV_VAR: &str = "POKEDEX_STORE";

// =============================================================================
// Presentation
// =============================================================================

/// Marker rendered in place of an absent secondary type
pub const NONE_MARKER: &str = "none";

