//! Pokedex Library
//!
//! A Rust library for cataloguing species reference data from a CSV file
//! into a local SQLite store and answering lookups against it.
//!
//! This library provides tools for:
//! - Parsing species CSV files with header-driven column mapping
//! - Validating rows and reporting the offending line on failure
//! - Rebuilding the SQLite table in a single transaction
//! - Looking species up by name, number or elemental type
//! - Rendering results as human-readable text, JSON or CSV

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod presentation;
        pub mod species_loader;
        pub mod species_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ElementalType, SpeciesRecord};
pub use app::services::species_store::SpeciesStore;
pub use config::Config;

/// Result type alias for the pokedex
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for loading and querying the species catalogue
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A source row could not be parsed or failed validation
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// A name or number lookup matched nothing
    #[error("Species not found: {query}")]
    NotFound { query: String },

    /// A lookup argument was rejected before reaching the store
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The source file or the store file could not be used at startup
    #[error("Store unavailable at '{path}': {reason}")]
    StoreUnavailable { path: String, reason: String },

    /// SQLite operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Rendering a result for display failed
    #[error("Output formatting error: {message}")]
    Output { message: String },
}

impl Error {
    /// Create a malformed record error for a 1-based file row
    pub fn malformed_record(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a store unavailable error
    pub fn store_unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Attach a source row to a validation failure
    pub fn at_row(self, row: usize) -> Self {
        match self {
            Self::InvalidInput { message } => Self::MalformedRecord {
                row,
                reason: message,
            },
            other => other,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an output formatting error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
