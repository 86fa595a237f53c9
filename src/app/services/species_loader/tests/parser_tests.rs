//! Tests for species header mapping and row parsing

use super::*;
use crate::Error;
use crate::app::models::ElementalType;
use crate::app::services::species_loader::parser::*;
use csv::StringRecord;

fn sample_headers() -> StringRecord {
    StringRecord::from(SAMPLE_HEADER.split(',').collect::<Vec<_>>())
}

fn row(line: &str) -> StringRecord {
    StringRecord::from(line.split(',').collect::<Vec<_>>())
}

#[test]
fn test_column_map_from_sample_header() {
    let columns = ColumnMap::from_headers(&sample_headers()).unwrap();

    assert_eq!(columns.name, 0);
    assert_eq!(columns.number, 1);
    assert_eq!(columns.type_secondary, 5);
    assert_eq!(columns.image_url, Some(6));
    assert_eq!(columns.generation, 7);
    assert_eq!(columns.evolves_from, Some(8));
}

#[test]
fn test_column_map_is_order_and_case_independent() {
    let headers = StringRecord::from(vec![
        " Generation_ID ",
        "TYPE_2",
        "type_1",
        "Weight",
        "height",
        "species_id",
        "Pokemon",
    ]);

    let columns = ColumnMap::from_headers(&headers).unwrap();
    assert_eq!(columns.name, 6);
    assert_eq!(columns.number, 5);
    assert_eq!(columns.generation, 0);
    assert_eq!(columns.image_url, None);
    assert_eq!(columns.evolves_from, None);
}

#[test]
fn test_column_map_reports_missing_columns() {
    let headers = StringRecord::from(vec!["pokemon", "species_id", "height"]);

    match ColumnMap::from_headers(&headers) {
        Err(Error::MalformedRecord { row, reason }) => {
            assert_eq!(row, 1);
            assert!(reason.contains("weight"));
            assert!(reason.contains("generation_id"));
        }
        other => panic!("expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_parse_species_row_valid() {
    let columns = ColumnMap::from_headers(&sample_headers()).unwrap();
    let record = parse_species_row(&row(SAMPLE_ROWS[3]), &columns, 5).unwrap();

    assert_eq!(record.number, 6);
    assert_eq!(record.name, "Charizard");
    assert_eq!(record.height_m, 1.7);
    assert_eq!(record.weight_kg, 90.5);
    assert_eq!(record.type_primary, ElementalType::Fire);
    assert_eq!(record.type_secondary, Some(ElementalType::Flying));
    assert_eq!(record.generation, 1);
    assert_eq!(
        record.image_url.as_deref(),
        Some("https://img.example/6.png")
    );
    assert_eq!(record.evolves_from, Some(5));
}

#[test]
fn test_parse_species_row_missing_secondary_type() {
    let columns = ColumnMap::from_headers(&sample_headers()).unwrap();
    let record = parse_species_row(&row(SAMPLE_ROWS[1]), &columns, 3).unwrap();

    assert_eq!(record.type_secondary, None);
    assert_eq!(record.evolves_from, None);
}

#[test]
fn test_parse_species_row_float_formatted_reference() {
    let columns = ColumnMap::from_headers(&sample_headers()).unwrap();
    let record = parse_species_row(&row(SAMPLE_ROWS[5]), &columns, 7).unwrap();

    assert_eq!(record.name, "Pikachu");
    assert_eq!(record.evolves_from, Some(172));
}

#[test]
fn test_parse_species_row_non_numeric_height() {
    let columns = ColumnMap::from_headers(&sample_headers()).unwrap();
    let bad = row("Pikachu,25,tall,6.0,electric,,url,1,nan");

    match parse_species_row(&bad, &columns, 9) {
        Err(Error::MalformedRecord { row, reason }) => {
            assert_eq!(row, 9);
            assert!(reason.contains("height"));
            assert!(reason.contains("tall"));
        }
        other => panic!("expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_parse_species_row_rejects_invalid_values() {
    let columns = ColumnMap::from_headers(&sample_headers()).unwrap();

    let cases = [
        ",25,0.4,6.0,electric,,url,1,nan",
        "Pikachu,0,0.4,6.0,electric,,url,1,nan",
        "Pikachu,-3,0.4,6.0,electric,,url,1,nan",
        "Pikachu,25,0.4,-6.0,electric,,url,1,nan",
        "Pikachu,25,0.4,6.0,,,url,1,nan",
        "Pikachu,25,0.4,6.0,plasma,,url,1,nan",
        "Pikachu,25,0.4,6.0,electric,electric,url,1,nan",
        "Pikachu,25,0.4,6.0,electric,,url,0,nan",
        "Pikachu,25,0.4,6.0,electric,,url,1,2.5",
        "Pikachu,25,0.4",
    ];

    for case in cases {
        let result = parse_species_row(&row(case), &columns, 4);
        assert!(
            matches!(result, Err(Error::MalformedRecord { row: 4, .. })),
            "row {:?} should be malformed, got {:?}",
            case,
            result
        );
    }
}

#[test]
fn test_is_missing_markers() {
    assert!(is_missing(""));
    assert!(is_missing("  "));
    assert!(is_missing("NaN"));
    assert!(is_missing("NA"));
    assert!(is_missing("None"));
    assert!(!is_missing("fire"));
    assert!(!is_missing("0"));
}
