//! Filter set and its query-string encoding.

use crate::model::Field;

/// User-entered filter values, one per [`Field`].
///
/// An empty string means "no constraint". Empty values never reach the wire.
///
/// # Example
///
/// ```
/// use catalog_lib::api::query::FilterSet;
/// use catalog_lib::model::Field;
///
/// let filters = FilterSet::new()
///     .with(Field::Name, "Rick")
///     .with(Field::Status, "Dead");
///
/// assert_eq!(
///     filters.query_pairs(),
///     vec![("name", "Rick".to_string()), ("status", "dead".to_string())]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub name: String,
    pub status: String,
    pub species: String,
    pub kind: String,
    pub gender: String,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for a field.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets the value for a field in place.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Returns the raw (untransformed) value for a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Status => &self.status,
            Field::Species => &self.species,
            Field::Type => &self.kind,
            Field::Gender => &self.gender,
        }
    }

    /// Returns `true` if no field constrains the result set.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).trim().is_empty())
    }

    /// Resets every field to "no constraint".
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns the `(key, value)` pairs to send upstream.
    ///
    /// Blank values are omitted. Status, species and gender are lowercased;
    /// name and type are passed through verbatim.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| {
                let value = self.get(field);
                if value.trim().is_empty() {
                    return None;
                }
                let value = if field.is_case_insensitive() {
                    value.to_lowercase()
                } else {
                    value.to_string()
                };
                Some((field.as_str(), value))
            })
            .collect()
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Status => &mut self.status,
            Field::Species => &mut self.species,
            Field::Type => &mut self.kind,
            Field::Gender => &mut self.gender,
        }
    }
}
