//! Persistence seam
//!
//! `Store` is the one interface the service layer talks to. `PgStore`
//! backs it with Postgres; `MemoryStore` keeps everything in process for
//! tests, demos and `serve --in-memory`.
//!
//! Every write is a single transaction: it either fully applies or
//! leaves the store untouched.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gigbook_core::models::{
    Artist, ArtistListing, ArtistUpdate, BookedShow, NamedListing, NewArtist, NewShow, NewVenue,
    Show, ShowListing, Venue, VenueSummary, VenueUpdate,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    /// A foreign key pointed at a row that does not exist
    #[error("{field} refers to missing {resource} '{id}'")]
    MissingReference {
        field: &'static str,
        resource: &'static str,
        id: i64,
    },

    /// The store refused the write (e.g. a read-only in-memory store)
    #[error("write rejected: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Every venue with its upcoming show count, ordered by id.
    async fn venue_summaries(&self, now: DateTime<Utc>) -> Result<Vec<VenueSummary>, DbError>;

    /// Venues whose name contains `term` (case-insensitive), ordered by id.
    async fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<NamedListing>, DbError>;

    async fn get_venue(&self, id: i64) -> Result<Venue, DbError>;

    /// Shows booked at a venue, counterpart = artist, ordered by start time.
    async fn venue_shows(&self, venue_id: i64) -> Result<Vec<BookedShow>, DbError>;

    async fn create_venue(&self, venue: NewVenue) -> Result<Venue, DbError>;

    async fn update_venue(&self, id: i64, update: &VenueUpdate) -> Result<Venue, DbError>;

    /// Delete a venue and its shows.
    async fn delete_venue(&self, id: i64) -> Result<(), DbError>;

    /// Every artist as `{id, name}`, ordered by id.
    async fn list_artists(&self) -> Result<Vec<ArtistListing>, DbError>;

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<NamedListing>, DbError>;

    async fn get_artist(&self, id: i64) -> Result<Artist, DbError>;

    /// Shows an artist is booked for, counterpart = venue, ordered by start time.
    async fn artist_shows(&self, artist_id: i64) -> Result<Vec<BookedShow>, DbError>;

    async fn create_artist(&self, artist: NewArtist) -> Result<Artist, DbError>;

    async fn update_artist(&self, id: i64, update: &ArtistUpdate) -> Result<Artist, DbError>;

    /// Every show joined with its venue and artist, ordered by start time.
    async fn list_shows(&self) -> Result<Vec<ShowListing>, DbError>;

    async fn create_show(&self, show: NewShow) -> Result<Show, DbError>;
}
