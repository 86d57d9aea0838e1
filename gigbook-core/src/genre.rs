//! Genre tags attached to venues and artists
//!
//! The set is closed. Values are stored and transmitted as their display
//! strings ("Hip-Hop", "R&B", ...), never as variant names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    #[serde(rename = "Heavy Metal")]
    HeavyMetal,
    Instrumental,
    Jazz,
    #[serde(rename = "Musical Theatre")]
    MusicalTheatre,
    Pop,
    Punk,
    #[serde(rename = "R&B")]
    RhythmAndBlues,
    Reggae,
    #[serde(rename = "Rock n Roll")]
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alternative => "Alternative",
            Self::Blues => "Blues",
            Self::Classical => "Classical",
            Self::Country => "Country",
            Self::Electronic => "Electronic",
            Self::Folk => "Folk",
            Self::Funk => "Funk",
            Self::HipHop => "Hip-Hop",
            Self::HeavyMetal => "Heavy Metal",
            Self::Instrumental => "Instrumental",
            Self::Jazz => "Jazz",
            Self::MusicalTheatre => "Musical Theatre",
            Self::Pop => "Pop",
            Self::Punk => "Punk",
            Self::RhythmAndBlues => "R&B",
            Self::Reggae => "Reggae",
            Self::RockNRoll => "Rock n Roll",
            Self::Soul => "Soul",
            Self::Other => "Other",
        }
    }

    /// Parse a display string. Matching is exact apart from surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|g| g.as_str() == trimmed)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "genres",
                value: s.to_owned(),
            })
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Alternative,
            Self::Blues,
            Self::Classical,
            Self::Country,
            Self::Electronic,
            Self::Folk,
            Self::Funk,
            Self::HipHop,
            Self::HeavyMetal,
            Self::Instrumental,
            Self::Jazz,
            Self::MusicalTheatre,
            Self::Pop,
            Self::Punk,
            Self::RhythmAndBlues,
            Self::Reggae,
            Self::RockNRoll,
            Self::Soul,
            Self::Other,
        ]
    }

    /// Display strings for every genre, in declaration order.
    pub fn choices() -> Vec<&'static str> {
        Self::all().iter().map(Genre::as_str).collect()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert stored genre strings back into tags.
///
/// Unknown strings are skipped with a warning; rows written by older
/// tooling should not make a whole listing unreadable.
pub fn from_stored(values: &[String]) -> Vec<Genre> {
    values
        .iter()
        .filter_map(|v| match Genre::parse(v) {
            Ok(g) => Some(g),
            Err(_) => {
                tracing::warn!(value = %v, "skipping unknown stored genre");
                None
            }
        })
        .collect()
}

/// Convert tags into the strings persisted in `TEXT[]` columns.
pub fn to_stored(genres: &[Genre]) -> Vec<String> {
    genres.iter().map(|g| g.as_str().to_owned()).collect()
}
