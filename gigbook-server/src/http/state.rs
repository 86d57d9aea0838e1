//! Shared application state

use std::sync::Arc;

use crate::store::Store;

/// State handed to every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
