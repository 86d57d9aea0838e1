//! Schema bootstrap for the venue, artist and show tables

use sqlx::PgPool;

/// Statements run in order; each one is idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city VARCHAR(120) NOT NULL,
        state VARCHAR(120) NOT NULL,
        address VARCHAR(120) NOT NULL,
        phone VARCHAR(120),
        genres TEXT[] NOT NULL DEFAULT '{}',
        image_link VARCHAR(500),
        facebook_link VARCHAR(120),
        website VARCHAR(120),
        seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description VARCHAR(120)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artists (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city VARCHAR(120) NOT NULL,
        state VARCHAR(120) NOT NULL,
        phone VARCHAR(120),
        genres TEXT[] NOT NULL DEFAULT '{}',
        image_link VARCHAR(500),
        facebook_link VARCHAR(120),
        website VARCHAR(120),
        seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description VARCHAR(120)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shows (
        id BIGSERIAL PRIMARY KEY,
        start_time TIMESTAMPTZ NOT NULL,
        venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id, start_time)",
];

/// Create any missing tables and indexes.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running gigbook migrations...");

    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_cascade_with_their_venue() {
        let shows = SCHEMA
            .iter()
            .find(|s| s.contains("CREATE TABLE IF NOT EXISTS shows"))
            .unwrap();
        assert!(shows.contains("REFERENCES venues(id) ON DELETE CASCADE"));
        assert!(shows.contains("REFERENCES artists(id)"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.unwrap();
        run(&pool).await.unwrap();
        run(&pool).await.unwrap();
    }
}
