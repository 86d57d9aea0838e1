//! Venue repository
//!
//! - summaries/search: LEFT JOIN with a filtered COUNT (no N+1)
//! - create/update/delete: one transaction each

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use gigbook_core::genre;
use gigbook_core::models::{BookedShow, NamedListing, NewVenue, Venue, VenueSummary, VenueUpdate};

use crate::store::DbError;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, genres, image_link, \
                             facebook_link, website, seeking_talent, seeking_description";

/// Venue record from database
#[derive(Debug, Clone, FromRow)]
struct VenueRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    address: String,
    phone: Option<String>,
    genres: Vec<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    seeking_talent: bool,
    seeking_description: Option<String>,
}

impl From<VenueRow> for Venue {
    fn from(r: VenueRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            city: r.city,
            state: r.state,
            address: r.address,
            phone: r.phone,
            genres: genre::from_stored(&r.genres),
            image_link: r.image_link,
            facebook_link: r.facebook_link,
            website: r.website,
            seeking_talent: r.seeking_talent,
            seeking_description: r.seeking_description,
        }
    }
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All venues with upcoming show counts, in id order.
    pub async fn summaries(&self, now: DateTime<Utc>) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        let summaries = rows
            .iter()
            .map(|r| {
                Ok(VenueSummary {
                    id: r.try_get("id")?,
                    name: r.try_get("name")?,
                    city: r.try_get("city")?,
                    state: r.try_get("state")?,
                    num_upcoming_shows: r.try_get("num_upcoming_shows")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(summaries)
    }

    /// Case-insensitive literal substring search on name.
    ///
    /// `strpos` keeps `%` and `_` in the term literal; an empty term matches every row.
    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<NamedListing>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                v.id,
                v.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE strpos(lower(v.name), lower($1)) > 0
            GROUP BY v.id
            ORDER BY v.id
            "#,
        )
        .bind(term)
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        let hits = rows
            .iter()
            .map(|r| {
                Ok(NamedListing {
                    id: r.try_get("id")?,
                    name: r.try_get("name")?,
                    num_upcoming_shows: r.try_get("num_upcoming_shows")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(hits)
    }

    pub async fn get(&self, id: i64) -> Result<Venue, DbError> {
        let row: VenueRow = sqlx::query_as(&format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "venue",
                id,
            })?;

        Ok(row.into())
    }

    /// Shows at this venue joined with their artist.
    pub async fn shows(&self, venue_id: i64) -> Result<Vec<BookedShow>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(self.pool)
        .await?;

        let shows = rows
            .iter()
            .map(|r| {
                Ok(BookedShow {
                    counterpart_id: r.try_get("artist_id")?,
                    counterpart_name: r.try_get("artist_name")?,
                    counterpart_image_link: r.try_get("artist_image_link")?,
                    start_time: r.try_get("start_time")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(shows)
    }

    /// Insert and commit. Any failure drops `tx`, which rolls back.
    pub async fn create(&self, venue: NewVenue) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let row: VenueRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO venues
                (name, city, state, address, phone, genres, image_link,
                 facebook_link, website, seeking_talent, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(venue.phone.as_deref())
        .bind(genre::to_stored(&venue.genres))
        .bind(venue.image_link.as_deref())
        .bind(venue.facebook_link.as_deref())
        .bind(venue.website.as_deref())
        .bind(venue.seeking_talent)
        .bind(venue.seeking_description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Apply an edit. Columns outside `VenueUpdate` are not written.
    pub async fn update(&self, id: i64, update: &VenueUpdate) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let row: VenueRow = sqlx::query_as(&format!(
            r#"
            UPDATE venues
            SET name = $2, city = $3, state = $4, phone = $5, genres = $6, facebook_link = $7
            WHERE id = $1
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.name)
        .bind(&update.city)
        .bind(&update.state)
        .bind(update.phone.as_deref())
        .bind(genre::to_stored(&update.genres))
        .bind(update.facebook_link.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound {
            resource: "venue",
            id,
        })?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Delete a venue; its shows go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "venue",
                id,
            });
        }

        tx.commit().await?;
        Ok(())
    }
}
