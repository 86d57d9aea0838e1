//! Show repository
//!
//! Referential integrity is left to the foreign keys: a booking that
//! points at a missing venue or artist fails the insert and is reported
//! as `DbError::MissingReference`, no check-then-insert.

use sqlx::{FromRow, PgPool, Row};

use gigbook_core::models::{NewShow, Show, ShowListing};

use crate::store::DbError;

#[derive(Debug, Clone, FromRow)]
struct ShowRow {
    id: i64,
    venue_id: i64,
    artist_id: i64,
    start_time: chrono::DateTime<chrono::Utc>,
}

impl From<ShowRow> for Show {
    fn from(r: ShowRow) -> Self {
        Self {
            id: r.id,
            venue_id: r.venue_id,
            artist_id: r.artist_id,
            start_time: r.start_time,
        }
    }
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every show with venue and artist names in one query.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                s.id,
                s.start_time,
                v.id AS venue_id,
                v.name AS venue_name,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time, s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let shows = rows
            .iter()
            .map(|r| {
                Ok(ShowListing {
                    id: r.try_get("id")?,
                    venue_id: r.try_get("venue_id")?,
                    venue_name: r.try_get("venue_name")?,
                    artist_id: r.try_get("artist_id")?,
                    artist_name: r.try_get("artist_name")?,
                    artist_image_link: r.try_get("artist_image_link")?,
                    start_time: r.try_get("start_time")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(shows)
    }

    pub async fn create(&self, show: NewShow) -> Result<Show, DbError> {
        let mut tx = self.pool.begin().await?;

        let row: ShowRow = sqlx::query_as(
            r#"
            INSERT INTO shows (start_time, venue_id, artist_id)
            VALUES ($1, $2, $3)
            RETURNING id, venue_id, artist_id, start_time
            "#,
        )
        .bind(show.start_time)
        .bind(show.venue_id)
        .bind(show.artist_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| missing_reference(e, &show))?;

        tx.commit().await?;
        Ok(row.into())
    }
}

/// Translate a foreign key violation into the field that caused it.
fn missing_reference(err: sqlx::Error, show: &NewShow) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            return if constraint.contains("artist") {
                DbError::MissingReference {
                    field: "artist_id",
                    resource: "artist",
                    id: show.artist_id,
                }
            } else {
                DbError::MissingReference {
                    field: "venue_id",
                    resource: "venue",
                    id: show.venue_id,
                }
            };
        }
    }
    DbError::Sqlx(err)
}
