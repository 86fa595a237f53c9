//! SQLite-backed species store
//!
//! The store owns a single SQLite connection for the lifetime of the
//! process. It is populated once by the loader and read by the query
//! methods in `query`. Dropping the store closes the connection, so the
//! handle is released on every exit path including a failed load.

use crate::app::models::{ElementalType, SpeciesRecord};
use crate::constants::{LOAD_METADATA_TABLE, SPECIES_TABLE};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod query;

#[cfg(test)]
pub mod tests;

pub use query::parse_species_number;

/// Column list shared by every species SELECT, in `row_to_record` order
pub(crate) const SPECIES_COLUMNS: &str = "species_id, name, height, weight, type_1, type_2, \
     generation_id, url_image, evolves_from_species_id";

/// Description of the last successful load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadMetadata {
    /// Source file the store was built from
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub record_count: usize,
}

/// Handle to the species store
pub struct SpeciesStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for SpeciesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeciesStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SpeciesStore {
    /// Open (creating if needed) the store file at `path`
    ///
    /// # Errors
    /// Returns `Error::StoreUnavailable` if the file cannot be opened as a
    /// SQLite database.
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening species store at {}", path.display());

        let conn = Connection::open(path)
            .and_then(|conn| {
                // Forces SQLite to read the header so a non-database file fails here
                conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))?;
                Ok(conn)
            })
            .map_err(|e| Error::store_unavailable(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::store_unavailable(":memory:", e.to_string()))?;
        Ok(Self { conn, path: None })
    }

    /// Path of the backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the species table exists and holds at least one row
    pub fn is_populated(&self) -> Result<bool> {
        if !self.table_exists(SPECIES_TABLE)? {
            return Ok(false);
        }

        let populated: bool = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {SPECIES_TABLE})"),
            [],
            |row| row.get(0),
        )?;
        Ok(populated)
    }

    /// Replace the store contents with `records`
    ///
    /// Drops and recreates the species table, inserts every record and
    /// records load metadata inside one transaction. If any statement fails
    /// the transaction is rolled back on drop and the previous contents are
    /// kept.
    pub fn replace_all(&mut self, records: &[SpeciesRecord], source: &str) -> Result<usize> {
        let tx = self.conn.transaction()?;

        tx.execute_batch(&schema_sql())?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {SPECIES_TABLE} ({SPECIES_COLUMNS}, name_key) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ))?;

            for record in records {
                stmt.execute(params![
                    record.number,
                    record.name,
                    record.height_m,
                    record.weight_kg,
                    record.type_primary,
                    record.type_secondary,
                    record.generation,
                    record.image_url,
                    record.evolves_from,
                    name_key(&record.name),
                ])?;
            }
        }

        tx.execute(
            &format!(
                "INSERT INTO {LOAD_METADATA_TABLE} (id, source, loaded_at, record_count) \
                 VALUES (1, ?1, ?2, ?3)"
            ),
            params![source, Utc::now().to_rfc3339(), records.len() as i64],
        )?;

        tx.commit()?;

        info!("Stored {} species records", records.len());
        Ok(records.len())
    }

    /// Metadata of the last successful load, if the store has been loaded
    pub fn load_metadata(&self) -> Result<Option<LoadMetadata>> {
        if !self.table_exists(LOAD_METADATA_TABLE)? {
            return Ok(None);
        }

        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT source, loaded_at, record_count FROM {LOAD_METADATA_TABLE} WHERE id = 1"
                ),
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((source, loaded_at, record_count)) = row else {
            return Ok(None);
        };

        let loaded_at = DateTime::parse_from_rfc3339(&loaded_at)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?
            .with_timezone(&Utc);

        Ok(Some(LoadMetadata {
            source,
            loaded_at,
            record_count: usize::try_from(record_count).unwrap_or_default(),
        }))
    }

    /// Fail with `StoreUnavailable` if the species table has never been created
    pub(crate) fn require_species_table(&self) -> Result<()> {
        if self.table_exists(SPECIES_TABLE)? {
            return Ok(());
        }

        let path = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string());
        Err(Error::store_unavailable(path, "species table has not been loaded"))
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![table],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Map a row selected with `SPECIES_COLUMNS` to a record
    pub(crate) fn row_to_record(row: &Row<'_>) -> rusqlite::Result<SpeciesRecord> {
        Ok(SpeciesRecord {
            number: row.get(0)?,
            name: row.get(1)?,
            height_m: row.get(2)?,
            weight_kg: row.get(3)?,
            type_primary: row.get(4)?,
            type_secondary: row.get(5)?,
            generation: row.get(6)?,
            image_url: row.get(7)?,
            evolves_from: row.get(8)?,
        })
    }
}

/// Lookup key for a species name
///
/// SQLite's NOCASE collation only folds ASCII, so names are folded here with
/// Unicode lowercasing and stored alongside the display name.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// DDL that rebuilds both tables from scratch
fn schema_sql() -> String {
    format!(
        "DROP TABLE IF EXISTS {SPECIES_TABLE};
         DROP TABLE IF EXISTS {LOAD_METADATA_TABLE};
         CREATE TABLE {SPECIES_TABLE} (
             species_id INTEGER PRIMARY KEY CHECK (species_id > 0),
             name TEXT NOT NULL CHECK (length(trim(name)) > 0),
             name_key TEXT NOT NULL UNIQUE,
             height REAL NOT NULL CHECK (height > 0),
             weight REAL NOT NULL CHECK (weight > 0),
             type_1 TEXT NOT NULL,
             type_2 TEXT CHECK (type_2 IS NULL OR type_2 <> type_1),
             generation_id INTEGER NOT NULL CHECK (generation_id > 0),
             url_image TEXT,
             evolves_from_species_id INTEGER
         );
         CREATE INDEX idx_{SPECIES_TABLE}_type_1 ON {SPECIES_TABLE} (type_1);
         CREATE INDEX idx_{SPECIES_TABLE}_type_2 ON {SPECIES_TABLE} (type_2);
         CREATE TABLE {LOAD_METADATA_TABLE} (
             id INTEGER PRIMARY KEY CHECK (id = 1),
             source TEXT NOT NULL,
             loaded_at TEXT NOT NULL,
             record_count INTEGER NOT NULL
         );"
    )
}

impl ToSql for ElementalType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ElementalType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}
