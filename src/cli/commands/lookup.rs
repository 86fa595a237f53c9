//! Lookup command implementations
//!
//! Runs one query against an already-prepared store and renders the result.

use crate::app::services::presentation::{render_listing, render_record, render_records};
use crate::app::services::species_store::{SpeciesStore, parse_species_number};
use crate::cli::args::{Commands, OutputFormat};
use crate::{Error, Result};
use tracing::debug;

/// Execute a lookup command and return the rendered output
///
/// # Errors
/// * `Error::InvalidInput` for malformed arguments
/// * `Error::NotFound` when a name or number matches nothing
/// * `Error::Configuration` if called with a non-lookup command
pub fn execute_lookup(
    store: &SpeciesStore,
    command: &Commands,
    format: OutputFormat,
) -> Result<String> {
    debug!("Executing lookup {:?} as {:?}", command, format);

    match command {
        Commands::Name { name } => render_record(&store.find_by_name(name)?, format),
        Commands::Number { number } => {
            let number = parse_species_number(number)?;
            render_record(&store.find_by_number(number)?, format)
        }
        Commands::Type { type_name } => render_records(&store.find_by_type(type_name)?, format),
        Commands::Names => render_listing(&store.species_names()?, "name", format),
        Commands::Numbers => render_listing(&store.species_numbers()?, "number", format),
        Commands::Types => {
            let types: Vec<String> = store
                .species_types()?
                .iter()
                .map(|t| t.to_string())
                .collect();
            render_listing(&types, "type", format)
        }
        Commands::Load | Commands::Status => Err(Error::configuration(format!(
            "{:?} is not a lookup command",
            command
        ))),
    }
}
