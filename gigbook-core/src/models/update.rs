//! Edit-form input shared by venues and artists
//!
//! An edit touches exactly name, city, state, phone, genres and
//! facebook_link. Every other column keeps its stored value.

use serde::Serialize;

use super::{Artist, Venue};
use crate::form::{self, FormData, MAX_TEXT_LEN};
use crate::genre::Genre;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingUpdate {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: Option<String>,
}

pub type VenueUpdate = ListingUpdate;
pub type ArtistUpdate = ListingUpdate;

impl ListingUpdate {
    pub const FIELDS: &'static [(&'static str, bool)] = &[
        ("name", true),
        ("city", true),
        ("state", true),
        ("phone", false),
        ("genres", true),
        ("facebook_link", false),
    ];

    /// Validate only the fields an edit applies.
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(form::required_text(form, "name", MAX_TEXT_LEN));
        let city = errors.check(form::required_text(form, "city", MAX_TEXT_LEN));
        let state = errors.check(form::state(form));
        let phone = errors.check(form::phone(form));
        let genres = errors.check(form::genres(form));
        let facebook_link = errors.check(form::link(form, "facebook_link", MAX_TEXT_LEN));

        errors.finish(|| Self {
            name: name.unwrap_or_default(),
            city: city.unwrap_or_default(),
            state: state.unwrap_or_default(),
            phone: phone.flatten(),
            genres: genres.unwrap_or_default(),
            facebook_link: facebook_link.flatten(),
        })
    }

    pub fn apply_to_venue(&self, venue: &mut Venue) {
        venue.name = self.name.clone();
        venue.city = self.city.clone();
        venue.state = self.state.clone();
        venue.phone = self.phone.clone();
        venue.genres = self.genres.clone();
        venue.facebook_link = self.facebook_link.clone();
    }

    pub fn apply_to_artist(&self, artist: &mut Artist) {
        artist.name = self.name.clone();
        artist.city = self.city.clone();
        artist.state = self.state.clone();
        artist.phone = self.phone.clone();
        artist.genres = self.genres.clone();
        artist.facebook_link = self.facebook_link.clone();
    }
}
