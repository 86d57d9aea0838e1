//! Shows: the booking of one artist at one venue at one instant

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::form::{self, FormData};
use crate::timefmt;
use crate::validation::FieldErrors;

fn api_time<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&timefmt::api_timestamp(ts))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    #[serde(serialize_with = "api_time")]
    pub start_time: DateTime<Utc>,
}

/// Validated input for booking a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl NewShow {
    pub const FIELDS: &'static [(&'static str, bool)] = &[
        ("artist_id", true),
        ("venue_id", true),
        ("start_time", true),
    ];

    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let artist_id = errors.check(form::entity_id(form, "artist_id"));
        let venue_id = errors.check(form::entity_id(form, "venue_id"));
        let start_time = errors.check(form::start_time(form));

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(Self {
                    artist_id,
                    venue_id,
                    start_time,
                })
            }
            _ => Err(errors),
        }
    }

    pub fn into_show(self, id: i64) -> Show {
        Show {
            id,
            venue_id: self.venue_id,
            artist_id: self.artist_id,
            start_time: self.start_time,
        }
    }
}

/// One show as seen from a venue or artist page: the other party plus the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedShow {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Row of the global show listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}
