//! Show endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::Value;

use super::created;
use crate::http::error::ApiError;
use crate::http::extractors::{DisplayFormat, FormBody};
use crate::http::state::AppState;
use crate::service;
use crate::views::{FormView, ShowView};

/// GET /shows - every show, earliest first
async fn list_shows(
    State(state): State<Arc<AppState>>,
    DisplayFormat(format): DisplayFormat,
) -> Result<Json<Vec<ShowView>>, ApiError> {
    Ok(Json(service::list_shows(state.store.as_ref(), format).await?))
}

/// GET /shows/create - start_time defaults to now
async fn create_show_form() -> Json<FormView> {
    Json(service::show_form(Utc::now()))
}

/// POST /shows/create
async fn create_show(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let listed = service::create_show(state.store.as_ref(), form).await?;
    Ok(created("show", listed))
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
