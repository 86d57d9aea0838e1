//! JSON view documents returned by the HTTP layer
//!
//! These are the shapes a template would be rendered from: detail pages
//! with their show lists split into past and upcoming, form descriptions
//! with prefilled values, and flash messages.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gigbook_core::form::{FormData, STATES};
use gigbook_core::models::{
    Artist, BookedShow, ListingUpdate, NewArtist, NewShow, NewVenue, ShowListing, Venue,
};
use gigbook_core::timefmt::{self, DateFormat};
use gigbook_core::{Genre, Partitioned};

/// One-shot status message shown after a create or edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Error,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }
}

fn display_time(ts: &DateTime<Utc>, format: Option<DateFormat>) -> Option<String> {
    format.map(|f| timefmt::display(ts, f))
}

/// A show on a venue page: the artist playing and when.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistSlot {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_display: Option<String>,
}

impl ArtistSlot {
    fn new(show: BookedShow, format: Option<DateFormat>) -> Self {
        Self {
            artist_id: show.counterpart_id,
            artist_name: show.counterpart_name,
            artist_image_link: show.counterpart_image_link,
            start_time: timefmt::api_timestamp(&show.start_time),
            start_time_display: display_time(&show.start_time, format),
        }
    }
}

/// A show on an artist page: the venue and when.
#[derive(Debug, Clone, Serialize)]
pub struct VenueSlot {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_display: Option<String>,
}

impl VenueSlot {
    fn new(show: BookedShow, format: Option<DateFormat>) -> Self {
        Self {
            venue_id: show.counterpart_id,
            venue_name: show.counterpart_name,
            venue_image_link: show.counterpart_image_link,
            start_time: timefmt::api_timestamp(&show.start_time),
            start_time_display: display_time(&show.start_time, format),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ArtistSlot>,
    pub upcoming_shows: Vec<ArtistSlot>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn new(venue: Venue, shows: Partitioned<BookedShow>, format: Option<DateFormat>) -> Self {
        let past_shows: Vec<_> = shows
            .past
            .into_iter()
            .map(|s| ArtistSlot::new(s, format))
            .collect();
        let upcoming_shows: Vec<_> = shows
            .upcoming
            .into_iter()
            .map(|s| ArtistSlot::new(s, format))
            .collect();
        Self {
            venue,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<VenueSlot>,
    pub upcoming_shows: Vec<VenueSlot>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn new(artist: Artist, shows: Partitioned<BookedShow>, format: Option<DateFormat>) -> Self {
        let past_shows: Vec<_> = shows
            .past
            .into_iter()
            .map(|s| VenueSlot::new(s, format))
            .collect();
        let upcoming_shows: Vec<_> = shows
            .upcoming
            .into_iter()
            .map(|s| VenueSlot::new(s, format))
            .collect();
        Self {
            artist,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Row of the show listing page.
#[derive(Debug, Clone, Serialize)]
pub struct ShowView {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_display: Option<String>,
}

impl ShowView {
    pub fn new(show: ShowListing, format: Option<DateFormat>) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: timefmt::api_timestamp(&show.start_time),
            start_time_display: display_time(&show.start_time, format),
        }
    }
}

/// Which form a submission or prefill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Venue,
    Artist,
    Show,
    VenueEdit,
    ArtistEdit,
}

impl FormKind {
    /// Field names and whether each is required.
    pub fn fields(&self) -> &'static [(&'static str, bool)] {
        match self {
            Self::Venue => NewVenue::FIELDS,
            Self::Artist => NewArtist::FIELDS,
            Self::Show => NewShow::FIELDS,
            Self::VenueEdit | Self::ArtistEdit => ListingUpdate::FIELDS,
        }
    }

    fn has_listing_choices(&self) -> bool {
        !matches!(self, Self::Show)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub required: bool,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Choices {
    pub genres: Vec<&'static str>,
    pub states: &'static [&'static str],
}

/// A form description: its fields with current values, plus select choices.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub form: FormKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Choices>,
}

impl FormView {
    /// Describe `kind` filled with whatever `values` holds for its fields.
    /// Submitted keys the form does not know are dropped.
    pub fn new(kind: FormKind, values: &FormData) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|&(name, required)| FieldView {
                name,
                required,
                values: values.get_all(name).into_iter().map(str::to_owned).collect(),
            })
            .collect();

        let choices = kind.has_listing_choices().then(|| Choices {
            genres: Genre::choices(),
            states: STATES,
        });

        Self {
            form: kind,
            record_id: None,
            fields,
            choices,
        }
    }

    pub fn for_record(mut self, id: i64) -> Self {
        self.record_id = Some(id);
        self
    }

    /// Current values of one field.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.values.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booked(name: &str) -> BookedShow {
        BookedShow {
            counterpart_id: 4,
            counterpart_name: name.into(),
            counterpart_image_link: None,
            start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap(),
        }
    }

    #[test]
    fn venue_slots_use_artist_keys() {
        let json = serde_json::to_value(ArtistSlot::new(booked("Guns N Petals"), None)).unwrap();
        assert_eq!(json["artist_id"], 4);
        assert_eq!(json["artist_name"], "Guns N Petals");
        assert_eq!(json["start_time"], "2019-05-21T21:30:00.000000Z");
        assert!(json.get("start_time_display").is_none());
    }

    #[test]
    fn display_time_only_when_asked() {
        let slot = VenueSlot::new(booked("The Musical Hop"), Some(DateFormat::Full));
        assert_eq!(
            slot.start_time_display.as_deref(),
            Some("Tuesday May, 21, 2019 at 9:30PM")
        );
    }

    #[test]
    fn form_view_keeps_known_fields_only() {
        let values = FormData::new()
            .with("name", "The Musical Hop")
            .with("genres", "Jazz")
            .with("genres", "Reggae")
            .with("bogus", "x");
        let view = FormView::new(FormKind::Venue, &values);

        assert_eq!(view.values("name"), Some(&["The Musical Hop".to_string()][..]));
        assert_eq!(view.values("genres").map(<[String]>::len), Some(2));
        assert_eq!(view.values("bogus"), None);
        assert!(view.choices.is_some());
        assert!(FormView::new(FormKind::Show, &values).choices.is_none());
    }

    #[test]
    fn detail_counts_match_lists() {
        let venue = Venue {
            id: 1,
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: None,
            genres: vec![Genre::Jazz],
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        };
        let shows = Partitioned {
            upcoming: vec![booked("a"), booked("b")],
            past: vec![booked("c")],
        };
        let json = serde_json::to_value(VenueDetail::new(venue, shows, None)).unwrap();
        assert_eq!(json["name"], "The Musical Hop");
        assert_eq!(json["genres"][0], "Jazz");
        assert_eq!(json["upcoming_shows_count"], 2);
        assert_eq!(json["past_shows_count"], 1);
    }
}
