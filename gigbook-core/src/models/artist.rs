//! Artist records and the typed inputs built from artist forms

use serde::Serialize;

use crate::form::{self, FormData, MAX_IMAGE_LINK_LEN, MAX_TEXT_LEN};
use crate::genre::Genre;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Validated input for inserting an artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl NewArtist {
    pub const FIELDS: &'static [(&'static str, bool)] = &[
        ("name", true),
        ("city", true),
        ("state", true),
        ("phone", false),
        ("genres", true),
        ("image_link", false),
        ("facebook_link", false),
        ("website", false),
        ("seeking_venue", false),
        ("seeking_description", false),
    ];

    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(form::required_text(form, "name", MAX_TEXT_LEN));
        let city = errors.check(form::required_text(form, "city", MAX_TEXT_LEN));
        let state = errors.check(form::state(form));
        let phone = errors.check(form::phone(form));
        let genres = errors.check(form::genres(form));
        let image_link = errors.check(form::link(form, "image_link", MAX_IMAGE_LINK_LEN));
        let facebook_link = errors.check(form::link(form, "facebook_link", MAX_TEXT_LEN));
        let website = errors.check(form::link(form, "website", MAX_TEXT_LEN));
        let seeking_description =
            errors.check(form::optional_text(form, "seeking_description", MAX_TEXT_LEN));

        errors.finish(|| Self {
            name: name.unwrap_or_default(),
            city: city.unwrap_or_default(),
            state: state.unwrap_or_default(),
            phone: phone.flatten(),
            genres: genres.unwrap_or_default(),
            image_link: image_link.flatten(),
            facebook_link: facebook_link.flatten(),
            website: website.flatten(),
            seeking_venue: form::checkbox(form, "seeking_venue"),
            seeking_description: seeking_description.flatten(),
        })
    }

    pub fn into_artist(self, id: i64) -> Artist {
        Artist {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

impl Artist {
    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("city", &self.city)
            .with("state", &self.state);
        for (key, value) in [
            ("phone", &self.phone),
            ("image_link", &self.image_link),
            ("facebook_link", &self.facebook_link),
            ("website", &self.website),
            ("seeking_description", &self.seeking_description),
        ] {
            if let Some(v) = value {
                form.push(key, v.as_str());
            }
        }
        for genre in &self.genres {
            form.push("genres", genre.as_str());
        }
        if self.seeking_venue {
            form.push("seeking_venue", "y");
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_with_website() {
        let form = FormData::new()
            .with("name", "Guns N Petals")
            .with("city", "San Francisco")
            .with("state", "CA")
            .with("genres", "Rock n Roll")
            .with("website", "https://www.gunsnpetalsband.com")
            .with("seeking_venue", "y");
        let artist = NewArtist::from_form(&form).unwrap();
        assert_eq!(artist.genres, vec![Genre::RockNRoll]);
        assert_eq!(artist.website.as_deref(), Some("https://www.gunsnpetalsband.com"));
        assert!(artist.seeking_venue);
    }

    #[test]
    fn address_is_not_an_artist_field() {
        let errors = NewArtist::from_form(&FormData::new()).unwrap_err();
        assert!(!errors.has_field("address"));
        assert_eq!(errors.len(), 4);
    }
}
