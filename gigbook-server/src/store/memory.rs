//! In-process store
//!
//! All three tables sit behind one `RwLock`; each write takes the write
//! lock once, checks everything it needs, then mutates. A write that fails
//! a check leaves the tables untouched.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use gigbook_core::models::{
    Artist, ArtistListing, ArtistUpdate, BookedShow, NamedListing, NewArtist, NewShow, NewVenue,
    Show, ShowListing, Venue, VenueSummary, VenueUpdate,
};
use gigbook_core::name_matches;
use gigbook_core::timing::count_upcoming;

use super::{DbError, Store};

#[derive(Debug, Default)]
struct Tables {
    venues: BTreeMap<i64, Venue>,
    artists: BTreeMap<i64, Artist>,
    shows: BTreeMap<i64, Show>,
    next_venue_id: i64,
    next_artist_id: i64,
    next_show_id: i64,
}

impl Tables {
    fn allocate(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn upcoming_at_venue(&self, venue_id: i64, now: &DateTime<Utc>) -> i64 {
        count_upcoming(
            self.shows
                .values()
                .filter(|s| s.venue_id == venue_id)
                .map(|s| &s.start_time),
            now,
        )
    }

    fn upcoming_for_artist(&self, artist_id: i64, now: &DateTime<Utc>) -> i64 {
        count_upcoming(
            self.shows
                .values()
                .filter(|s| s.artist_id == artist_id)
                .map(|s| &s.start_time),
            now,
        )
    }

    /// Shows matching `keep`, sorted by start time then id.
    fn shows_where(&self, keep: impl Fn(&Show) -> bool) -> Vec<&Show> {
        let mut shows: Vec<&Show> = self.shows.values().filter(|&s| keep(s)).collect();
        shows.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        shows
    }
}

/// Store kept entirely in memory. Ids start at 1 per table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `DbError::Rejected`.
    ///
    /// Used to exercise the persistence-failure path without a database.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), DbError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DbError::Rejected("store is read-only".into()));
        }
        Ok(())
    }

    /// Number of shows currently stored.
    pub async fn show_count(&self) -> usize {
        self.tables.read().await.shows.len()
    }

    /// Number of venues currently stored.
    pub async fn venue_count(&self) -> usize {
        self.tables.read().await.venues.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn venue_summaries(&self, now: DateTime<Utc>) -> Result<Vec<VenueSummary>, DbError> {
        let t = self.tables.read().await;
        Ok(t.venues
            .values()
            .map(|v| VenueSummary {
                id: v.id,
                name: v.name.clone(),
                city: v.city.clone(),
                state: v.state.clone(),
                num_upcoming_shows: t.upcoming_at_venue(v.id, &now),
            })
            .collect())
    }

    async fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<NamedListing>, DbError> {
        let t = self.tables.read().await;
        Ok(t.venues
            .values()
            .filter(|v| name_matches(&v.name, term))
            .map(|v| NamedListing {
                id: v.id,
                name: v.name.clone(),
                num_upcoming_shows: t.upcoming_at_venue(v.id, &now),
            })
            .collect())
    }

    async fn get_venue(&self, id: i64) -> Result<Venue, DbError> {
        self.tables
            .read()
            .await
            .venues
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound {
                resource: "venue",
                id,
            })
    }

    async fn venue_shows(&self, venue_id: i64) -> Result<Vec<BookedShow>, DbError> {
        let t = self.tables.read().await;
        Ok(t.shows_where(|s| s.venue_id == venue_id)
            .into_iter()
            .filter_map(|s| {
                let artist = t.artists.get(&s.artist_id)?;
                Some(BookedShow {
                    counterpart_id: artist.id,
                    counterpart_name: artist.name.clone(),
                    counterpart_image_link: artist.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn create_venue(&self, venue: NewVenue) -> Result<Venue, DbError> {
        self.check_writable()?;
        let mut t = self.tables.write().await;
        let id = Tables::allocate(&mut t.next_venue_id);
        let venue = venue.into_venue(id);
        t.venues.insert(id, venue.clone());
        Ok(venue)
    }

    async fn update_venue(&self, id: i64, update: &VenueUpdate) -> Result<Venue, DbError> {
        self.check_writable()?;
        let mut t = self.tables.write().await;
        let venue = t.venues.get_mut(&id).ok_or(DbError::NotFound {
            resource: "venue",
            id,
        })?;
        update.apply_to_venue(venue);
        Ok(venue.clone())
    }

    async fn delete_venue(&self, id: i64) -> Result<(), DbError> {
        self.check_writable()?;
        let mut t = self.tables.write().await;
        if t.venues.remove(&id).is_none() {
            return Err(DbError::NotFound {
                resource: "venue",
                id,
            });
        }
        t.shows.retain(|_, s| s.venue_id != id);
        Ok(())
    }

    async fn list_artists(&self) -> Result<Vec<ArtistListing>, DbError> {
        let t = self.tables.read().await;
        Ok(t.artists
            .values()
            .map(|a| ArtistListing {
                id: a.id,
                name: a.name.clone(),
            })
            .collect())
    }

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<NamedListing>, DbError> {
        let t = self.tables.read().await;
        Ok(t.artists
            .values()
            .filter(|a| name_matches(&a.name, term))
            .map(|a| NamedListing {
                id: a.id,
                name: a.name.clone(),
                num_upcoming_shows: t.upcoming_for_artist(a.id, &now),
            })
            .collect())
    }

    async fn get_artist(&self, id: i64) -> Result<Artist, DbError> {
        self.tables
            .read()
            .await
            .artists
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound {
                resource: "artist",
                id,
            })
    }

    async fn artist_shows(&self, artist_id: i64) -> Result<Vec<BookedShow>, DbError> {
        let t = self.tables.read().await;
        Ok(t.shows_where(|s| s.artist_id == artist_id)
            .into_iter()
            .filter_map(|s| {
                let venue = t.venues.get(&s.venue_id)?;
                Some(BookedShow {
                    counterpart_id: venue.id,
                    counterpart_name: venue.name.clone(),
                    counterpart_image_link: venue.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn create_artist(&self, artist: NewArtist) -> Result<Artist, DbError> {
        self.check_writable()?;
        let mut t = self.tables.write().await;
        let id = Tables::allocate(&mut t.next_artist_id);
        let artist = artist.into_artist(id);
        t.artists.insert(id, artist.clone());
        Ok(artist)
    }

    async fn update_artist(&self, id: i64, update: &ArtistUpdate) -> Result<Artist, DbError> {
        self.check_writable()?;
        let mut t = self.tables.write().await;
        let artist = t.artists.get_mut(&id).ok_or(DbError::NotFound {
            resource: "artist",
            id,
        })?;
        update.apply_to_artist(artist);
        Ok(artist.clone())
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, DbError> {
        let t = self.tables.read().await;
        Ok(t.shows_where(|_| true)
            .into_iter()
            .filter_map(|s| {
                let venue = t.venues.get(&s.venue_id)?;
                let artist = t.artists.get(&s.artist_id)?;
                Some(ShowListing {
                    id: s.id,
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn create_show(&self, show: NewShow) -> Result<Show, DbError> {
        self.check_writable()?;
        let mut t = self.tables.write().await;
        if !t.artists.contains_key(&show.artist_id) {
            return Err(DbError::MissingReference {
                field: "artist_id",
                resource: "artist",
                id: show.artist_id,
            });
        }
        if !t.venues.contains_key(&show.venue_id) {
            return Err(DbError::MissingReference {
                field: "venue_id",
                resource: "venue",
                id: show.venue_id,
            });
        }
        let id = Tables::allocate(&mut t.next_show_id);
        let show = show.into_show(id);
        t.shows.insert(id, show.clone());
        Ok(show)
    }
}
