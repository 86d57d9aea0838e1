//! Command implementations for the gigbook CLI

pub mod migrate;
pub mod seed;
pub mod serve;

pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

use anyhow::{Context, Result};
use gigbook_core::GigbookConfig;
use gigbook_server::db::{create_pool_with_options, migrations, PgPool};

/// Open the pool and bring the schema up to date.
pub(crate) async fn connect(settings: &GigbookConfig, explicit_url: Option<&str>) -> Result<PgPool> {
    let database_url = settings.database_url(explicit_url);
    let pool = create_pool_with_options(&database_url, settings.database.max_connections)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    Ok(pool)
}
