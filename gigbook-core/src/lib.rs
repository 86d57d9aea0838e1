//! gigbook-core: domain model for the gigbook booking directory
//!
//! Venues, artists and the shows that book one at the other, plus the
//! pure pieces of logic shared by every store and transport:
//! form validation, past/upcoming classification, grouping venues by
//! area, name search and timestamp formatting.

pub mod config;
pub mod directory;
pub mod form;
pub mod genre;
pub mod models;
pub mod search;
pub mod timefmt;
pub mod timing;
pub mod validation;

pub use config::GigbookConfig;
pub use directory::{group_by_area, Area, AreaVenue};
pub use form::FormData;
pub use genre::Genre;
pub use search::{name_matches, SearchResults};
pub use timefmt::DateFormat;
pub use timing::{partition, Partitioned, ShowTiming};
pub use validation::{FieldErrors, ValidationError};
