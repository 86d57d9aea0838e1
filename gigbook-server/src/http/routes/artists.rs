//! Artist endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::Value;

use gigbook_core::models::{ArtistListing, NamedListing};
use gigbook_core::{FormData, SearchResults};

use super::created;
use crate::http::error::ApiError;
use crate::http::extractors::{DisplayFormat, EntityId, FormBody};
use crate::http::state::AppState;
use crate::service;
use crate::views::{ArtistDetail, FormKind, FormView};

/// GET /artists
async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistListing>>, ApiError> {
    Ok(Json(service::list_artists(state.store.as_ref()).await?))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody,
) -> Result<Json<SearchResults<NamedListing>>, ApiError> {
    let term = form.get("search_term").unwrap_or_default();
    let results = service::search_artists(state.store.as_ref(), term, Utc::now()).await?;
    Ok(Json(results))
}

/// GET /artists/{id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    DisplayFormat(format): DisplayFormat,
) -> Result<Json<ArtistDetail>, ApiError> {
    let detail =
        service::artist_detail(state.store.as_ref(), id, Utc::now(), format).await?;
    Ok(Json(detail))
}

async fn create_artist_form() -> Json<FormView> {
    Json(FormView::new(FormKind::Artist, &FormData::new()))
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let listed = service::create_artist(state.store.as_ref(), form).await?;
    Ok(created("artist", listed))
}

async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<FormView>, ApiError> {
    Ok(Json(service::artist_edit_form(state.store.as_ref(), id).await?))
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    FormBody(form): FormBody,
) -> Result<Redirect, ApiError> {
    let id = service::update_artist(state.store.as_ref(), id, form).await?;
    Ok(Redirect::to(&format!("/artists/{id}")))
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}
