//! Domain records and validated inputs
//!
//! Stored rows (`Venue`, `Artist`, `Show`) are plain data; relationships
//! are resolved by the store with explicit joins and handed back as the
//! projection types below.

pub mod artist;
pub mod show;
pub mod update;
pub mod venue;

use serde::Serialize;

pub use artist::{Artist, NewArtist};
pub use show::{BookedShow, NewShow, Show, ShowListing};
pub use update::{ArtistUpdate, ListingUpdate, VenueUpdate};
pub use venue::{NewVenue, Venue};

/// Venue with its upcoming show count, input to area grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Search hit for a venue or artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedListing {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<VenueSummary> for NamedListing {
    fn from(v: VenueSummary) -> Self {
        Self {
            id: v.id,
            name: v.name,
            num_upcoming_shows: v.num_upcoming_shows,
        }
    }
}

/// Row of the artist directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistListing {
    pub id: i64,
    pub name: String,
}
