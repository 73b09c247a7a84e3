//! Filterable and sortable character fields

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A character field that can be filtered, sorted or enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Status,
    Species,
    Type,
    Gender,
}

impl Field {
    /// All fields, in filter-form order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Status,
        Field::Species,
        Field::Type,
        Field::Gender,
    ];

    /// Columns the table can be sorted by.
    pub const SORTABLE: [Field; 4] = [Field::Name, Field::Status, Field::Species, Field::Gender];

    /// Fields whose distinct values populate the filter option lists.
    pub const DISTINCT: [Field; 3] = [Field::Status, Field::Species, Field::Gender];

    /// Returns the upstream wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Status => "status",
            Field::Species => "species",
            Field::Type => "type",
            Field::Gender => "gender",
        }
    }

    /// Returns `true` if filter values for this field are lowercased before
    /// they go on the wire.
    pub fn is_case_insensitive(&self) -> bool {
        matches!(self, Field::Status | Field::Species | Field::Gender)
    }

    /// Returns `true` if the table can be sorted by this field.
    pub fn is_sortable(&self) -> bool {
        Self::SORTABLE.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_argument(format!("unknown field: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!("name".parse::<Field>().unwrap(), Field::Name);
        assert_eq!(" Gender ".parse::<Field>().unwrap(), Field::Gender);
        assert_eq!("type".parse::<Field>().unwrap(), Field::Type);
        assert!("episode".parse::<Field>().is_err());
    }

    #[test]
    fn test_case_insensitive_fields() {
        assert!(!Field::Name.is_case_insensitive());
        assert!(!Field::Type.is_case_insensitive());
        assert!(Field::Status.is_case_insensitive());
        assert!(Field::Species.is_case_insensitive());
        assert!(Field::Gender.is_case_insensitive());
    }

    #[test]
    fn test_type_is_not_sortable() {
        assert!(Field::Name.is_sortable());
        assert!(!Field::Type.is_sortable());
    }
}
