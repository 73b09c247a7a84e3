//! Detail view projection of a single character.

use crate::model::Character;

/// The fields shown when a row is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDetail {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub status: String,
    pub species: String,
    /// The character's type, or `"Unknown"` when the upstream leaves it blank.
    pub kind: String,
    pub gender: String,
    pub origin: String,
    pub location: String,
    pub episodes: Vec<u32>,
    /// Creation date as `YYYY-MM-DD`, if known.
    pub created: Option<String>,
}

impl From<&Character> for CharacterDetail {
    fn from(character: &Character) -> Self {
        let kind = if character.kind.trim().is_empty() {
            "Unknown".to_string()
        } else {
            character.kind.clone()
        };

        Self {
            id: character.id,
            name: character.name.clone(),
            image: character.image.clone(),
            status: character.status.clone(),
            species: character.species.clone(),
            kind,
            gender: character.gender.clone(),
            origin: character.origin.name.clone(),
            location: character.location.name.clone(),
            episodes: character.episode_numbers(),
            created: character.created.map(|at| at.format("%Y-%m-%d").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_blank_type_reads_unknown() {
        let detail = CharacterDetail::from(&Character::new(1, "Rick Sanchez"));
        assert_eq!(detail.kind, "Unknown");
        assert!(detail.created.is_none());
    }

    #[test]
    fn test_projection() {
        let mut c = Character::new(2, "Morty Smith").with_kind("Clone");
        c.location.name = "Citadel of Ricks".into();
        c.episode = vec!["https://rickandmortyapi.com/api/episode/5".into()];
        c.created = Utc.with_ymd_and_hms(2017, 11, 4, 18, 50, 21).single();

        let detail = CharacterDetail::from(&c);
        assert_eq!(detail.kind, "Clone");
        assert_eq!(detail.location, "Citadel of Ricks");
        assert_eq!(detail.episodes, vec![5]);
        assert_eq!(detail.created.as_deref(), Some("2017-11-04"));
    }
}
