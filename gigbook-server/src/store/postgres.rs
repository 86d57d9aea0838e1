//! Postgres-backed store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gigbook_core::models::{
    Artist, ArtistListing, ArtistUpdate, BookedShow, NamedListing, NewArtist, NewShow, NewVenue,
    Show, ShowListing, Venue, VenueSummary, VenueUpdate,
};

use super::{DbError, Store};
use crate::db::repos::{ArtistRepo, ShowRepo, VenueRepo};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn venue_summaries(&self, now: DateTime<Utc>) -> Result<Vec<VenueSummary>, DbError> {
        VenueRepo::new(&self.pool).summaries(now).await
    }

    async fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<NamedListing>, DbError> {
        VenueRepo::new(&self.pool).search(term, now).await
    }

    async fn get_venue(&self, id: i64) -> Result<Venue, DbError> {
        VenueRepo::new(&self.pool).get(id).await
    }

    async fn venue_shows(&self, venue_id: i64) -> Result<Vec<BookedShow>, DbError> {
        VenueRepo::new(&self.pool).shows(venue_id).await
    }

    async fn create_venue(&self, venue: NewVenue) -> Result<Venue, DbError> {
        VenueRepo::new(&self.pool).create(venue).await
    }

    async fn update_venue(&self, id: i64, update: &VenueUpdate) -> Result<Venue, DbError> {
        VenueRepo::new(&self.pool).update(id, update).await
    }

    async fn delete_venue(&self, id: i64) -> Result<(), DbError> {
        VenueRepo::new(&self.pool).delete(id).await
    }

    async fn list_artists(&self) -> Result<Vec<ArtistListing>, DbError> {
        ArtistRepo::new(&self.pool).list().await
    }

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<NamedListing>, DbError> {
        ArtistRepo::new(&self.pool).search(term, now).await
    }

    async fn get_artist(&self, id: i64) -> Result<Artist, DbError> {
        ArtistRepo::new(&self.pool).get(id).await
    }

    async fn artist_shows(&self, artist_id: i64) -> Result<Vec<BookedShow>, DbError> {
        ArtistRepo::new(&self.pool).shows(artist_id).await
    }

    async fn create_artist(&self, artist: NewArtist) -> Result<Artist, DbError> {
        ArtistRepo::new(&self.pool).create(artist).await
    }

    async fn update_artist(&self, id: i64, update: &ArtistUpdate) -> Result<Artist, DbError> {
        ArtistRepo::new(&self.pool).update(id, update).await
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, DbError> {
        ShowRepo::new(&self.pool).list().await
    }

    async fn create_show(&self, show: NewShow) -> Result<Show, DbError> {
        ShowRepo::new(&self.pool).create(show).await
    }
}
