//! Validation error types

use std::fmt;

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

/// A single field that failed its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match the required format (e.g., URL, phone)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value is not one of the allowed choices
    InvalidVariant { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the form field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::InvalidVariant { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationError", 2)?;
        s.serialize_field("field", self.field())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

/// Every rule violation found in one form submission.
///
/// Validation does not stop at the first bad field, so a form can be
/// redisplayed with all of its inline errors at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    /// Record the error side of `result`, passing the value through.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Errors reported against one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.0.iter().filter(move |e| e.field() == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(e: ValidationError) -> Self {
        Self(vec![e])
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for e in &self.0 {
            seq.serialize_element(e)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 120,
        };
        assert_eq!(err.to_string(), "name exceeds maximum length of 120 characters");
        assert_eq!(
            ValidationError::Empty { field: "city" }.to_string(),
            "city is required"
        );
    }

    #[test]
    fn collects_without_short_circuit() {
        let mut errors = FieldErrors::new();
        let a: Option<u32> = errors.check(Err(ValidationError::Empty { field: "name" }));
        let b = errors.check(Ok::<_, ValidationError>(7));
        let c: Option<u32> = errors.check(Err(ValidationError::Empty { field: "city" }));

        assert!(a.is_none());
        assert_eq!(b, Some(7));
        assert!(c.is_none());
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("city"));
        assert!(!errors.has_field("state"));
        assert!(errors.finish(|| ()).is_err());
    }

    #[test]
    fn serializes_field_and_message() {
        let errors = FieldErrors::from(ValidationError::InvalidFormat {
            field: "facebook_link",
            reason: "must be an http(s) URL",
        });
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json[0]["field"], "facebook_link");
        assert_eq!(json[0]["message"], "facebook_link: must be an http(s) URL");
    }
}
