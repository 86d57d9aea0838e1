//! Postgres access: pool, schema and repositories

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use sqlx::PgPool;
