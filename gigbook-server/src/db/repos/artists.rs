//! Artist repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use gigbook_core::genre;
use gigbook_core::models::{Artist, ArtistListing, ArtistUpdate, BookedShow, NamedListing, NewArtist};

use crate::store::DbError;

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, image_link, \
                              facebook_link, website, seeking_venue, seeking_description";

#[derive(Debug, Clone, FromRow)]
struct ArtistRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    phone: Option<String>,
    genres: Vec<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    seeking_venue: bool,
    seeking_description: Option<String>,
}

impl From<ArtistRow> for Artist {
    fn from(r: ArtistRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            city: r.city,
            state: r.state,
            phone: r.phone,
            genres: genre::from_stored(&r.genres),
            image_link: r.image_link,
            facebook_link: r.facebook_link,
            website: r.website,
            seeking_venue: r.seeking_venue,
            seeking_description: r.seeking_description,
        }
    }
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ArtistListing>, DbError> {
        let rows = sqlx::query("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        let artists = rows
            .iter()
            .map(|r| {
                Ok(ArtistListing {
                    id: r.try_get("id")?,
                    name: r.try_get("name")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(artists)
    }

    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<NamedListing>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE strpos(lower(a.name), lower($1)) > 0
            GROUP BY a.id
            ORDER BY a.id
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

    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        let row: ArtistRow =
            sqlx::query_as(&format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?
                .ok_or(DbError::NotFound {
                    resource: "artist",
                    id,
                })?;

        Ok(row.into())
    }

    /// Shows for this artist joined with their venue.
    pub async fn shows(&self, artist_id: i64) -> Result<Vec<BookedShow>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                v.id AS venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;

        let shows = rows
            .iter()
            .map(|r| {
                Ok(BookedShow {
                    counterpart_id: r.try_get("venue_id")?,
                    counterpart_name: r.try_get("venue_name")?,
                    counterpart_image_link: r.try_get("venue_image_link")?,
                    start_time: r.try_get("start_time")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(shows)
    }

    pub async fn create(&self, artist: NewArtist) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let row: ArtistRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO artists
                (name, city, state, phone, genres, image_link,
                 facebook_link, website, seeking_venue, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ARTIST_COLUMNS}
            "#
        ))
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(artist.phone.as_deref())
        .bind(genre::to_stored(&artist.genres))
        .bind(artist.image_link.as_deref())
        .bind(artist.facebook_link.as_deref())
        .bind(artist.website.as_deref())
        .bind(artist.seeking_venue)
        .bind(artist.seeking_description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    pub async fn update(&self, id: i64, update: &ArtistUpdate) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let row: ArtistRow = sqlx::query_as(&format!(
            r#"
            UPDATE artists
            SET name = $2, city = $3, state = $4, phone = $5, genres = $6, facebook_link = $7
            WHERE id = $1
            RETURNING {ARTIST_COLUMNS}
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
            resource: "artist",
            id,
        })?;

        tx.commit().await?;
        Ok(row.into())
    }
}
