//! Shared fixtures for species store tests

use crate::app::services::species_loader::SpeciesLoader;
use crate::app::services::species_loader::tests::sample_csv;
use crate::app::services::species_store::SpeciesStore;

pub mod query_tests;

/// In-memory store loaded with the sample species
pub fn sample_store() -> SpeciesStore {
    let (records, _) = SpeciesLoader::new("sample.csv")
        .parse_reader(sample_csv().as_bytes())
        .unwrap();

    let mut store = SpeciesStore::open_in_memory().unwrap();
    store.replace_all(&records, "sample.csv").unwrap();
    store
}
