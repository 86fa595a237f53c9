//! Core domain models for the species catalogue
//!
//! This module defines the species record stored in the catalogue and the
//! fixed set of elemental categories a species can belong to.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elemental category (type) of a species
///
/// The set is closed: every species has a primary type from this list and
/// optionally a different secondary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementalType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementalType {
    /// Every elemental type, in canonical order
    pub const ALL: [ElementalType; 18] = [
        ElementalType::Normal,
        ElementalType::Fire,
        ElementalType::Water,
        ElementalType::Electric,
        ElementalType::Grass,
        ElementalType::Ice,
        ElementalType::Fighting,
        ElementalType::Poison,
        ElementalType::Ground,
        ElementalType::Flying,
        ElementalType::Psychic,
        ElementalType::Bug,
        ElementalType::Rock,
        ElementalType::Ghost,
        ElementalType::Dragon,
        ElementalType::Dark,
        ElementalType::Steel,
        ElementalType::Fairy,
    ];

    /// Lowercase identifier used in the store and in source files
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementalType::Normal => "normal",
            ElementalType::Fire => "fire",
            ElementalType::Water => "water",
            ElementalType::Electric => "electric",
            ElementalType::Grass => "grass",
            ElementalType::Ice => "ice",
            ElementalType::Fighting => "fighting",
            ElementalType::Poison => "poison",
            ElementalType::Ground => "ground",
            ElementalType::Flying => "flying",
            ElementalType::Psychic => "psychic",
            ElementalType::Bug => "bug",
            ElementalType::Rock => "rock",
            ElementalType::Ghost => "ghost",
            ElementalType::Dragon => "dragon",
            ElementalType::Dark => "dark",
            ElementalType::Steel => "steel",
            ElementalType::Fairy => "fairy",
        }
    }

    /// Comma-separated list of accepted type names, for error messages
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.as_str();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for ElementalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input("type cannot be empty"));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "unknown type '{}', expected one of: {}",
                    trimmed,
                    Self::valid_names()
                ))
            })
    }
}

/// One catalogued species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// National number, unique and stable
    pub number: u32,
    /// Display name, unique ignoring case
    pub name: String,
    pub height_m: f64,
    pub weight_kg: f64,
    pub type_primary: ElementalType,
    pub type_secondary: Option<ElementalType>,
    /// Release generation the species was introduced in
    pub generation: u32,
    pub image_url: Option<String>,
    /// Number of the species this one evolves from, if any
    pub evolves_from: Option<u32>,
}

impl SpeciesRecord {
    /// Create a new species record with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        number: u32,
        name: String,
        height_m: f64,
        weight_kg: f64,
        type_primary: ElementalType,
        type_secondary: Option<ElementalType>,
        generation: u32,
        image_url: Option<String>,
        evolves_from: Option<u32>,
    ) -> Result<Self> {
        let record = Self {
            number,
            name,
            height_m,
            weight_kg,
            type_primary,
            type_secondary,
            generation,
            image_url,
            evolves_from,
        };

        record.validate()?;
        Ok(record)
    }

    /// Validate field ranges and cross-field consistency
    pub fn validate(&self) -> Result<()> {
        if self.number == 0 {
            return Err(Error::invalid_input("species number must be positive"));
        }

        if self.name.trim().is_empty() {
            return Err(Error::invalid_input("species name cannot be empty"));
        }

        if !(self.height_m.is_finite() && self.height_m > 0.0) {
            return Err(Error::invalid_input(format!(
                "height {} must be a positive number",
                self.height_m
            )));
        }

        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(Error::invalid_input(format!(
                "weight {} must be a positive number",
                self.weight_kg
            )));
        }

        if self.type_secondary == Some(self.type_primary) {
            return Err(Error::invalid_input(format!(
                "secondary type cannot repeat primary type '{}'",
                self.type_primary
            )));
        }

        if self.generation == 0 {
            return Err(Error::invalid_input("generation must be positive"));
        }

        if self.evolves_from == Some(self.number) {
            return Err(Error::invalid_input(format!(
                "species {} cannot evolve from itself",
                self.number
            )));
        }

        Ok(())
    }

    /// Whether the species carries the given type in either slot
    pub fn has_type(&self, elemental_type: ElementalType) -> bool {
        self.type_primary == elemental_type || self.type_secondary == Some(elemental_type)
    }
}
