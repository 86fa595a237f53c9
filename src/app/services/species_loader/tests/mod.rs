//! Shared test utilities and fixtures for species loader tests

use std::fs;
use std::path::{Path, PathBuf};

pub mod parser_tests;

/// Header matching the column names of the upstream species file
pub const SAMPLE_HEADER: &str =
    "pokemon,species_id,height,weight,type_1,type_2,url_image,generation_id,evolves_from_species_id";

/// Ten species, deliberately out of number order, with a mix of single and
/// dual types. Fire members: 4, 5, 6, 146, 228, 250.
pub const SAMPLE_ROWS: &[&str] = &[
    "Bulbasaur,1,0.7,6.9,grass,poison,https://img.example/1.png,1,nan",
    "Charmander,4,0.6,8.5,fire,,https://img.example/4.png,1,nan",
    "Charmeleon,5,1.1,19.0,fire,,https://img.example/5.png,1,4",
    "Charizard,6,1.7,90.5,fire,flying,https://img.example/6.png,1,5",
    "Squirtle,7,0.5,9.0,water,,https://img.example/7.png,1,nan",
    "Pikachu,25,0.4,6.0,electric,,https://img.example/25.png,1,172.0",
    "Ho-Oh,250,3.8,199.0,fire,flying,https://img.example/250.png,2,nan",
    "Moltres,146,2.0,60.0,fire,flying,https://img.example/146.png,1,nan",
    "Houndour,228,0.6,10.8,dark,fire,https://img.example/228.png,2,nan",
    "Pichu,172,0.3,2.0,electric,,https://img.example/172.png,2,nan",
];

/// Full sample source file contents
pub fn sample_csv() -> String {
    csv_with_rows(SAMPLE_ROWS)
}

/// Source file contents with the sample header and the given rows
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut content = String::from(SAMPLE_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

/// Write a source file into `dir` and return its path
pub fn write_source(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}
