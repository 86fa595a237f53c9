//! Tests for species lookups and listings

use super::*;
use crate::Error;
use crate::app::models::{ElementalType, SpeciesRecord};
use crate::app::services::species_store::SpeciesStore;
use crate::app::services::species_loader::SpeciesLoader;
use crate::app::services::species_loader::tests::sample_csv;
use crate::app::services::species_store::parse_species_number;

#[test]
fn test_find_by_number_round_trips_every_row() {
    let store = sample_store();
    let (records, _) = SpeciesLoader::new("sample.csv")
        .parse_reader(sample_csv().as_bytes())
        .unwrap();

    for record in records {
        let found = store.find_by_number(i64::from(record.number)).unwrap();
        assert_eq!(found, record);
    }
}

#[test]
fn test_find_by_number_invalid_and_missing() {
    let store = sample_store();

    assert!(matches!(
        store.find_by_number(0),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        store.find_by_number(-1),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        store.find_by_number(9999),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_find_by_name_is_case_insensitive() {
    let store = sample_store();

    let lower = store.find_by_name("pikachu").unwrap();
    let title = store.find_by_name("Pikachu").unwrap();
    let shouting = store.find_by_name("  PIKACHU ").unwrap();

    assert_eq!(lower, title);
    assert_eq!(lower, shouting);
    assert_eq!(lower.number, 25);
    assert_eq!(lower.name, "Pikachu");
}

#[test]
fn test_find_by_name_errors() {
    let store = sample_store();

    assert!(matches!(
        store.find_by_name("Not-A-Real-Species"),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        store.find_by_name("   "),
        Err(Error::InvalidInput { .. })
    ));
    // exact match only, no prefix search
    assert!(matches!(
        store.find_by_name("Pika"),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_find_by_type_primary_and_secondary_sorted() {
    let store = sample_store();
    let fire = store.find_by_type("Fire").unwrap();

    let numbers: Vec<u32> = fire.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![4, 5, 6, 146, 228, 250]);
    assert!(fire.iter().all(|r| r.has_type(ElementalType::Fire)));

    // Houndour is dark/fire and only matches through its secondary type
    let houndour = fire.iter().find(|r| r.number == 228).unwrap();
    assert_eq!(houndour.type_primary, ElementalType::Dark);
}

#[test]
fn test_find_by_type_case_insensitive_and_empty_result() {
    let store = sample_store();

    assert_eq!(
        store.find_by_type("fire").unwrap(),
        store.find_by_type("FIRE").unwrap()
    );
    assert!(store.find_by_type("fairy").unwrap().is_empty());
}

#[test]
fn test_find_by_type_invalid_input() {
    let store = sample_store();

    assert!(matches!(
        store.find_by_type(""),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        store.find_by_type("plasma"),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn test_catalogue_listings() {
    let store = sample_store();

    let names = store.species_names().unwrap();
    assert_eq!(names.first().map(String::as_str), Some("Bulbasaur"));
    assert_eq!(names.last().map(String::as_str), Some("Squirtle"));
    assert_eq!(names.len(), 10);

    let numbers = store.species_numbers().unwrap();
    assert_eq!(numbers, vec![1, 4, 5, 6, 7, 25, 146, 172, 228, 250]);

    let types = store.species_types().unwrap();
    assert_eq!(
        types,
        vec![
            ElementalType::Dark,
            ElementalType::Electric,
            ElementalType::Fire,
            ElementalType::Flying,
            ElementalType::Grass,
            ElementalType::Poison,
            ElementalType::Water,
        ]
    );
}

#[test]
fn test_parse_species_number() {
    assert_eq!(parse_species_number("25").unwrap(), 25);
    assert_eq!(parse_species_number(" -1 ").unwrap(), -1);
    assert!(matches!(
        parse_species_number("twenty-five"),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        parse_species_number(""),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn test_find_by_name_folds_non_ascii_case() {
    let mut store = SpeciesStore::open_in_memory().unwrap();
    let flabebe = SpeciesRecord::new(
        669,
        "Flabébé".to_string(),
        0.1,
        0.1,
        ElementalType::Fairy,
        None,
        6,
        None,
        None,
    )
    .unwrap();
    store.replace_all(&[flabebe], "kalos.csv").unwrap();

    assert_eq!(store.find_by_name("flabébé").unwrap().number, 669);
    assert_eq!(store.find_by_name("FLABÉBÉ").unwrap().number, 669);
    assert_eq!(store.find_by_name(" FlaBÉbé ").unwrap().name, "Flabébé");
}

#[test]
fn test_queries_on_unloaded_store_are_store_unavailable() {
    let store = SpeciesStore::open_in_memory().unwrap();

    assert!(matches!(
        store.find_by_name("pikachu"),
        Err(Error::StoreUnavailable { .. })
    ));
    assert!(matches!(
        store.find_by_number(25),
        Err(Error::StoreUnavailable { .. })
    ));
    assert!(matches!(
        store.find_by_type("fire"),
        Err(Error::StoreUnavailable { .. })
    ));
    assert!(matches!(
        store.species_names(),
        Err(Error::StoreUnavailable { .. })
    ));
    assert!(matches!(store.count(), Err(Error::StoreUnavailable { .. })));

    // Argument validation still runs first
    assert!(matches!(
        store.find_by_number(0),
        Err(Error::InvalidInput { .. })
    ));
}
