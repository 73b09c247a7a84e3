//! Character record as returned by the upstream API

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Field;

/// A named link to another upstream resource (origin or location).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Display name, e.g. `"Earth (C-137)"` or `"unknown"`.
    pub name: String,
    /// Resource URL; empty when the place is unknown.
    #[serde(default)]
    pub url: String,
}

/// A character record.
///
/// Only `id` and the filter/sort fields carry meaning for paging and sorting;
/// the rest is display data passed through untouched.
///
/// # Example
///
/// ```
/// use catalog_lib::model::{Character, Field};
///
/// let rick = Character::new(1, "Rick Sanchez")
///     .with_status("Alive")
///     .with_species("Human");
///
/// assert_eq!(rick.field(Field::Status), "Alive");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique, stable identifier.
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    /// Sub-species or variant; frequently empty.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: Place,
    #[serde(default)]
    pub location: Place,
    /// Avatar image URL.
    #[serde(default)]
    pub image: String,
    /// URLs of the episodes the character appears in.
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    pub created: Option<DateTime<Utc>>,
}

impl Character {
    /// Creates a character with only an id and a name set.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: String::new(),
            species: String::new(),
            kind: String::new(),
            gender: String::new(),
            origin: Place::default(),
            location: Place::default(),
            image: String::new(),
            episode: Vec::new(),
            url: String::new(),
            created: None,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the species.
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    /// Sets the type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the gender.
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    /// Returns the string value of a filter/sort field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Status => &self.status,
            Field::Species => &self.species,
            Field::Type => &self.kind,
            Field::Gender => &self.gender,
        }
    }

    /// Returns the episode numbers parsed from the trailing segment of each
    /// episode URL. URLs without a numeric tail are skipped.
    pub fn episode_numbers(&self) -> Vec<u32> {
        self.episode
            .iter()
            .filter_map(|url| url.trim_end_matches('/').rsplit('/').next())
            .filter_map(|tail| tail.parse().ok())
            .collect()
    }
}
