//! gigbook-server: HTTP service for the gigbook booking directory
//!
//! Venues, artists and shows behind a JSON API, backed by Postgres or an
//! in-memory store.

pub mod db;
pub mod http;
pub mod seed;
pub mod service;
pub mod store;
pub mod views;

pub use http::{build_router, run_server, AppState, ServerConfig};
pub use store::{DbError, MemoryStore, PgStore, Store};
