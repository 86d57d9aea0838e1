//! Submitted form fields and the per-field rules applied to them
//!
//! `FormData` is the transport-neutral view of a form post: an ordered
//! list of key/value pairs where a key may repeat (`genres=Jazz&genres=Soul`).
//! The rule functions below turn one field into a typed value or a
//! `ValidationError`; the model constructors compose them.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::genre::Genre;
use crate::timefmt;
use crate::validation::ValidationError;

/// Column width used by most text fields
pub const MAX_TEXT_LEN: usize = 120;

/// Column width for image links
pub const MAX_IMAGE_LINK_LEN: usize = 500;

/// US state codes accepted by the `state` field (50 states plus DC).
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("invalid url regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9().\- ]{7,20}$").expect("invalid phone regex"));

/// Ordered multimap of submitted form fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and seeding.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.push((key.to_owned(), value.to_owned()));
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// First value submitted under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted under `key`, in submission order.
    ///
    /// `genres[]` is accepted as an alias of `genres` because that is how
    /// multi-selects are often named by HTML forms.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        let bracketed = format!("{}[]", key);
        self.0
            .iter()
            .filter(|(k, _)| k == key || *k == bracketed)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Required free text, trimmed.
pub fn required_text(
    form: &FormData,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let value = non_blank(form.get(field)).ok_or(ValidationError::Empty { field })?;
    check_len(field, value, max)?;
    Ok(value.to_owned())
}

/// Optional free text, trimmed; blank becomes `None`.
pub fn optional_text(
    form: &FormData,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match non_blank(form.get(field)) {
        Some(value) => {
            check_len(field, value, max)?;
            Ok(Some(value.to_owned()))
        }
        None => Ok(None),
    }
}

/// Required two-letter state code (case-insensitive on input, stored upper case).
pub fn state(form: &FormData) -> Result<String, ValidationError> {
    let field = "state";
    let value = non_blank(form.get(field)).ok_or(ValidationError::Empty { field })?;
    let code = value.to_ascii_uppercase();
    if STATES.contains(&code.as_str()) {
        Ok(code)
    } else {
        Err(ValidationError::InvalidVariant {
            field,
            value: value.to_owned(),
        })
    }
}

/// Optional phone number.
pub fn phone(form: &FormData) -> Result<Option<String>, ValidationError> {
    let field = "phone";
    match non_blank(form.get(field)) {
        Some(value) if PHONE_RE.is_match(value) => Ok(Some(value.to_owned())),
        Some(_) => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a phone number such as 123-123-1234",
        }),
        None => Ok(None),
    }
}

/// Optional http(s) link.
pub fn link(
    form: &FormData,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match non_blank(form.get(field)) {
        Some(value) => {
            check_len(field, value, max)?;
            if URL_RE.is_match(value) {
                Ok(Some(value.to_owned()))
            } else {
                Err(ValidationError::InvalidFormat {
                    field,
                    reason: "must be an http(s) URL",
                })
            }
        }
        None => Ok(None),
    }
}

/// At least one genre; unknown values rejected, duplicates dropped.
pub fn genres(form: &FormData) -> Result<Vec<Genre>, ValidationError> {
    let field = "genres";
    let mut out: Vec<Genre> = Vec::new();
    for raw in form.get_all(field) {
        if raw.trim().is_empty() {
            continue;
        }
        let genre = Genre::parse(raw)?;
        if !out.contains(&genre) {
            out.push(genre);
        }
    }
    if out.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(out)
}

/// HTML checkbox semantics: absent means false.
pub fn checkbox(form: &FormData, field: &'static str) -> bool {
    matches!(
        form.get(field).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "yes" | "on" | "true" | "1")
    )
}

/// Required positive integer id.
pub fn entity_id(form: &FormData, field: &'static str) -> Result<i64, ValidationError> {
    let value = non_blank(form.get(field)).ok_or(ValidationError::Empty { field })?;
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer id",
        }),
    }
}

/// Required timestamp.
pub fn start_time(form: &FormData) -> Result<DateTime<Utc>, ValidationError> {
    let field = "start_time";
    let value = non_blank(form.get(field)).ok_or(ValidationError::Empty { field })?;
    timefmt::parse_timestamp(value).map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be a date and time such as 2019-05-21 21:30:00",
    })
}
