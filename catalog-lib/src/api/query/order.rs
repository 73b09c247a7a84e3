//! Client-side ordering of an already-fetched page.

use std::cmp::Ordering;

use crate::model::Character;
use crate::model::Field;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Which column the page is sorted by, if any.
///
/// # Example
///
/// ```
/// use catalog_lib::api::query::{Direction, SortSpec};
/// use catalog_lib::model::Field;
///
/// let mut spec = SortSpec::none();
/// spec.toggle(Field::Name);
/// assert_eq!(spec, SortSpec::asc(Field::Name));
///
/// spec.toggle(Field::Name);
/// assert_eq!(spec.direction, Direction::Desc);
///
/// spec.toggle(Field::Gender);
/// assert_eq!(spec, SortSpec::asc(Field::Gender));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    /// Sort key; `None` keeps upstream order.
    pub key: Option<Field>,
    pub direction: Direction,
}

impl SortSpec {
    /// No sorting.
    pub fn none() -> Self {
        Self::default()
    }

    /// Ascending on a field.
    pub fn asc(field: Field) -> Self {
        Self {
            key: Some(field),
            direction: Direction::Asc,
        }
    }

    /// Descending on a field.
    pub fn desc(field: Field) -> Self {
        Self {
            key: Some(field),
            direction: Direction::Desc,
        }
    }

    /// Header click: the same key flips direction, a new key starts ascending.
    pub fn toggle(&mut self, field: Field) {
        if self.key == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            *self = Self::asc(field);
        }
    }

    /// Returns the direction for `field` if it is the active key.
    pub fn direction_for(&self, field: Field) -> Option<Direction> {
        (self.key == Some(field)).then_some(self.direction)
    }
}

/// Sorts a fetched page in place.
///
/// Keys compare case-insensitively; equal keys keep their input order. With no
/// key the page is left untouched.
pub fn sort_page(records: &mut [Character], spec: &SortSpec) {
    let Some(key) = spec.key else { return };
    records.sort_by(|a, b| compare(a, b, key, spec.direction));
}

/// Returns a sorted copy of a fetched page.
pub fn sorted(records: &[Character], spec: &SortSpec) -> Vec<Character> {
    let mut out = records.to_vec();
    sort_page(&mut out, spec);
    out
}

fn compare(a: &Character, b: &Character, key: Field, direction: Direction) -> Ordering {
    let ordering = a
        .field(key)
        .to_lowercase()
        .cmp(&b.field(key).to_lowercase());
    direction.apply(ordering)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(records: &[Character]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    fn page() -> Vec<Character> {
        vec![
            Character::new(1, "rick").with_species("Human"),
            Character::new(2, "Morty").with_species("human"),
            Character::new(3, "Birdperson").with_species("Bird-Person"),
            Character::new(4, "Summer").with_species("HUMAN"),
            Character::new(5, "Abradolf").with_species("Alien"),
        ]
    }

    #[test]
    fn test_no_key_is_noop() {
        let out = sorted(&page(), &SortSpec::none());
        assert_eq!(ids(&out), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_case_insensitive_ascending() {
        let out = sorted(&page(), &SortSpec::asc(Field::Name));
        assert_eq!(ids(&out), vec![5, 3, 2, 1, 4]);
    }

    #[test]
    fn test_descending() {
        let out = sorted(&page(), &SortSpec::desc(Field::Name));
        assert_eq!(ids(&out), vec![4, 1, 2, 3, 5]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let asc = sorted(&page(), &SortSpec::asc(Field::Species));
        assert_eq!(ids(&asc), vec![5, 3, 1, 2, 4]);

        let desc = sorted(&page(), &SortSpec::desc(Field::Species));
        assert_eq!(ids(&desc), vec![1, 2, 4, 3, 5]);
    }

    #[test]
    fn test_idempotent() {
        let spec = SortSpec::desc(Field::Species);
        let once = sorted(&page(), &spec);
        let twice = sorted(&once, &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_value_sorts_first() {
        let records = vec![
            Character::new(1, "a").with_status("Alive"),
            Character::new(2, "b"),
        ];
        let out = sorted(&records, &SortSpec::asc(Field::Status));
        assert_eq!(ids(&out), vec![2, 1]);
    }

    #[test]
    fn test_direction_for() {
        let spec = SortSpec::desc(Field::Gender);
        assert_eq!(spec.direction_for(Field::Gender), Some(Direction::Desc));
        assert_eq!(spec.direction_for(Field::Name), None);
    }
}
