//! Venue records and the typed inputs built from venue forms

use serde::Serialize;

use crate::form::{self, FormData, MAX_IMAGE_LINK_LEN, MAX_TEXT_LEN};
use crate::genre::Genre;
use crate::validation::FieldErrors;

/// Venue row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Validated input for inserting a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl NewVenue {
    /// Form fields and whether each is required.
    pub const FIELDS: &'static [(&'static str, bool)] = &[
        ("name", true),
        ("city", true),
        ("state", true),
        ("address", true),
        ("phone", false),
        ("genres", true),
        ("image_link", false),
        ("facebook_link", false),
        ("website", false),
        ("seeking_talent", false),
        ("seeking_description", false),
    ];

    /// Validate a venue form. All failing fields are reported together.
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(form::required_text(form, "name", MAX_TEXT_LEN));
        let city = errors.check(form::required_text(form, "city", MAX_TEXT_LEN));
        let state = errors.check(form::state(form));
        let address = errors.check(form::required_text(form, "address", MAX_TEXT_LEN));
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
            address: address.unwrap_or_default(),
            phone: phone.flatten(),
            genres: genres.unwrap_or_default(),
            image_link: image_link.flatten(),
            facebook_link: facebook_link.flatten(),
            website: website.flatten(),
            seeking_talent: form::checkbox(form, "seeking_talent"),
            seeking_description: seeking_description.flatten(),
        })
    }

    /// Attach a generated id.
    pub fn into_venue(self, id: i64) -> Venue {
        Venue {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            genres: self.genres,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

impl Venue {
    /// Current values as form fields, for edit-form prefill.
    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("city", &self.city)
            .with("state", &self.state)
            .with("address", &self.address);
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
        if self.seeking_talent {
            form.push("seeking_talent", "y");
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn musical_hop() -> FormData {
        FormData::new()
            .with("name", "The Musical Hop")
            .with("city", "San Francisco")
            .with("state", "CA")
            .with("address", "1015 Folsom Street")
            .with("phone", "123-123-1234")
            .with("genres", "Jazz")
            .with("genres", "Reggae")
            .with("facebook_link", "https://www.facebook.com/TheMusicalHop")
    }

    #[test]
    fn valid_form() {
        let venue = NewVenue::from_form(&musical_hop()).unwrap();
        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.genres, vec![Genre::Jazz, Genre::Reggae]);
        assert!(!venue.seeking_talent);
        assert_eq!(venue.website, None);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = NewVenue::from_form(&FormData::new()).unwrap_err();
        for field in ["name", "city", "state", "address", "genres"] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn bad_optional_field_fails_whole_form() {
        let form = musical_hop().with("website", "not a url");
        let errors = NewVenue::from_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("website"));
    }

    #[test]
    fn prefill_round_trips_through_validation() {
        let venue = NewVenue::from_form(&musical_hop().with("seeking_talent", "y"))
            .unwrap()
            .into_venue(1);
        let again = NewVenue::from_form(&venue.to_form()).unwrap();
        assert_eq!(again.into_venue(1), venue);
    }
}
