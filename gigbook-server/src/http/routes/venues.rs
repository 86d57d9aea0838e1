//! Venue endpoints

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

use gigbook_core::models::NamedListing;
use gigbook_core::{FormData, SearchResults};

use super::created;
use crate::http::error::ApiError;
use crate::http::extractors::{DisplayFormat, EntityId, FormBody};
use crate::http::state::AppState;
use crate::service::{self, DeleteOutcome, VenueAreas};
use crate::views::{FormKind, FormView, VenueDetail};

/// GET /venues - venues grouped by city and state
async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Json<VenueAreas>, ApiError> {
    let areas = service::venue_areas(state.store.as_ref(), Utc::now()).await?;
    Ok(Json(areas))
}

/// POST /venues/search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody,
) -> Result<Json<SearchResults<NamedListing>>, ApiError> {
    let term = form.get("search_term").unwrap_or_default();
    let results = service::search_venues(state.store.as_ref(), term, Utc::now()).await?;
    Ok(Json(results))
}

/// GET /venues/{id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    DisplayFormat(format): DisplayFormat,
) -> Result<Json<VenueDetail>, ApiError> {
    let detail =
        service::venue_detail(state.store.as_ref(), id, Utc::now(), format).await?;
    Ok(Json(detail))
}

/// GET /venues/create - empty venue form
async fn create_venue_form() -> Json<FormView> {
    Json(FormView::new(FormKind::Venue, &FormData::new()))
}

/// POST /venues/create
async fn create_venue(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let listed = service::create_venue(state.store.as_ref(), form).await?;
    Ok(created("venue", listed))
}

/// DELETE /venues/{id} - always answers `{success}`
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Json<DeleteOutcome> {
    Json(service::delete_venue(state.store.as_ref(), id).await)
}

/// GET /venues/{id}/edit - form prefilled with current values
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<FormView>, ApiError> {
    let form = service::venue_edit_form(state.store.as_ref(), id).await?;
    Ok(Json(form))
}

/// POST /venues/{id}/edit - 303 to the detail page on success
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    FormBody(form): FormBody,
) -> Result<Redirect, ApiError> {
    let id = service::update_venue(state.store.as_ref(), id, form).await?;
    Ok(Redirect::to(&format!("/venues/{id}")))
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
}
