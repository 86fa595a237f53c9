//! Species lookup and listing functionality
//!
//! Read-only queries against the species store: exact lookups by name and
//! number, membership lookups by elemental type, and catalogue listings.
//! None of these methods mutate the store.

use super::{SPECIES_COLUMNS, SpeciesStore, name_key};
use crate::app::models::{ElementalType, SpeciesRecord};
use crate::constants::SPECIES_TABLE;
use crate::{Error, Result};
use rusqlite::{OptionalExtension, params};
use tracing::debug;

impl SpeciesStore {
    /// Find a species by name, ignoring case and surrounding whitespace
    ///
    /// Case folding is Unicode-aware, so `FLABÉBÉ` finds `Flabébé`.
    ///
    /// # Errors
    /// * `Error::InvalidInput` if `name` is empty
    /// * `Error::NotFound` if no species has that name
    /// * `Error::StoreUnavailable` if the store has never been loaded
    ///
    /// # Examples
    /// ```
    /// # use pokedex::SpeciesStore;
    /// let store = SpeciesStore::open_in_memory().unwrap();
    /// assert!(store.find_by_name("").is_err());
    /// ```
    pub fn find_by_name(&self, name: &str) -> Result<SpeciesRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("name cannot be empty"));
        }

        self.require_species_table()?;
        debug!("Looking up species by name '{}'", name);
        self.conn
            .query_row(
                &format!("SELECT {SPECIES_COLUMNS} FROM {SPECIES_TABLE} WHERE name_key = ?1"),
                params![name_key(name)],
                Self::row_to_record,
            )
            .optional()?
            .ok_or_else(|| Error::not_found(format!("name '{}'", name)))
    }

    /// Find a species by its number
    ///
    /// # Errors
    /// * `Error::InvalidInput` if `number` is zero or negative
    /// * `Error::NotFound` if no species has that number
    pub fn find_by_number(&self, number: i64) -> Result<SpeciesRecord> {
        if number <= 0 {
            return Err(Error::invalid_input(format!(
                "species number must be a positive integer, got {}",
                number
            )));
        }

        self.require_species_table()?;
        debug!("Looking up species by number {}", number);
        self.conn
            .query_row(
                &format!("SELECT {SPECIES_COLUMNS} FROM {SPECIES_TABLE} WHERE species_id = ?1"),
                params![number],
                Self::row_to_record,
            )
            .optional()?
            .ok_or_else(|| Error::not_found(format!("number {}", number)))
    }

    /// Find every species carrying `type_name` as primary or secondary type
    ///
    /// Results are ordered by number ascending. A valid type with no members
    /// yields an empty vector.
    ///
    /// # Errors
    /// * `Error::InvalidInput` if `type_name` is empty or not an elemental type
    pub fn find_by_type(&self, type_name: &str) -> Result<Vec<SpeciesRecord>> {
        let elemental_type: ElementalType = type_name.parse()?;
        self.find_by_elemental_type(elemental_type)
    }

    /// Typed variant of `find_by_type`
    pub fn find_by_elemental_type(
        &self,
        elemental_type: ElementalType,
    ) -> Result<Vec<SpeciesRecord>> {
        self.require_species_table()?;
        debug!("Looking up species of type {}", elemental_type);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SPECIES_COLUMNS} FROM {SPECIES_TABLE} \
             WHERE type_1 = ?1 OR type_2 = ?1 ORDER BY species_id ASC"
        ))?;

        let records = stmt
            .query_map(params![elemental_type], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// All species names, sorted alphabetically ignoring case
    pub fn species_names(&self) -> Result<Vec<String>> {
        self.require_species_table()?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT name FROM {SPECIES_TABLE} ORDER BY name COLLATE NOCASE ASC"
        ))?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// All species numbers in ascending order
    pub fn species_numbers(&self) -> Result<Vec<u32>> {
        self.require_species_table()?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT species_id FROM {SPECIES_TABLE} ORDER BY species_id ASC"
        ))?;

        let numbers = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<u32>>>()?;
        Ok(numbers)
    }

    /// Distinct elemental types present in the store, primary or secondary,
    /// sorted alphabetically
    pub fn species_types(&self) -> Result<Vec<ElementalType>> {
        self.require_species_table()?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT type_1 FROM {SPECIES_TABLE} \
             UNION SELECT type_2 FROM {SPECIES_TABLE} WHERE type_2 IS NOT NULL"
        ))?;

        let mut types = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<ElementalType>>>()?;
        types.sort_by_key(|t| t.as_str());
        Ok(types)
    }

    /// Number of species in the store
    pub fn count(&self) -> Result<usize> {
        self.require_species_table()?;
        let count: i64 = self.conn.query_row(
            &format!("SELECT count(*) FROM {SPECIES_TABLE}"),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Parse a species number given as text
///
/// # Errors
/// Returns `Error::InvalidInput` if `text` is not an integer. Range checks
/// are left to `find_by_number`.
pub fn parse_species_number(text: &str) -> Result<i64> {
    let text = text.trim();
    text.parse::<i64>().map_err(|_| {
        Error::invalid_input(format!("species number must be an integer, got '{}'", text))
    })
}
