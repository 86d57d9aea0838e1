//! Booking operations
//!
//! Each function takes the store, validates what needs validating, and
//! returns a view document or a `ServiceError` the HTTP layer can map to a
//! status code. Nothing here knows about axum.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gigbook_core::form::FormData;
use gigbook_core::models::{
    Artist, ArtistListing, ArtistUpdate, NamedListing, NewArtist, NewShow, NewVenue, Show, Venue,
    VenueUpdate,
};
use gigbook_core::timefmt::{self, DateFormat};
use gigbook_core::{group_by_area, partition, Area, FieldErrors, SearchResults, ValidationError};

use crate::store::{DbError, Store};
use crate::views::{ArtistDetail, Flash, FormKind, FormView, ShowView, VenueDetail};

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The submission failed validation; nothing was written
    #[error("invalid submission: {errors}")]
    Invalid {
        form: FormKind,
        /// Record being edited, `None` for a create
        record_id: Option<i64>,
        errors: FieldErrors,
        values: FormData,
    },

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: i64 },

    /// The write was rolled back; `flash` is safe to show to the user
    #[error("{flash}")]
    Persistence {
        form: FormKind,
        record_id: Option<i64>,
        flash: String,
        values: FormData,
        #[source]
        source: DbError,
    },

    #[error(transparent)]
    Db(DbError),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            other => Self::Db(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// A record that was just written, with the flash announcing it.
#[derive(Debug, Clone, Serialize)]
pub struct Listed<T> {
    pub flash: Flash,
    pub record: T,
}

/// Outcome of a delete. Failures are reported, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub success: bool,
}

/// Venue directory document.
#[derive(Debug, Clone, Serialize)]
pub struct VenueAreas {
    pub areas: Vec<Area>,
}

fn invalid(
    form: FormKind,
    record_id: Option<i64>,
    errors: FieldErrors,
    values: FormData,
) -> ServiceError {
    tracing::debug!(?form, ?record_id, %errors, "form rejected");
    ServiceError::Invalid {
        form,
        record_id,
        errors,
        values,
    }
}

fn rolled_back(
    form: FormKind,
    record_id: Option<i64>,
    flash: String,
    values: FormData,
    source: DbError,
) -> ServiceError {
    tracing::warn!(?form, ?record_id, error = %source, "write rolled back");
    ServiceError::Persistence {
        form,
        record_id,
        flash,
        values,
        source,
    }
}

// ============================================================================
// Venues
// ============================================================================

pub async fn venue_areas(store: &dyn Store, now: DateTime<Utc>) -> Result<VenueAreas> {
    let summaries = store.venue_summaries(now).await?;
    Ok(VenueAreas {
        areas: group_by_area(summaries),
    })
}

pub async fn search_venues(
    store: &dyn Store,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults<NamedListing>> {
    let hits = store.search_venues(term, now).await?;
    Ok(SearchResults::new(term, hits))
}

pub async fn venue_detail(
    store: &dyn Store,
    id: i64,
    now: DateTime<Utc>,
    format: Option<DateFormat>,
) -> Result<VenueDetail> {
    let venue = store.get_venue(id).await?;
    let shows = store.venue_shows(id).await?;
    let split = partition(shows, &now, |s| s.start_time);
    Ok(VenueDetail::new(venue, split, format))
}

pub async fn create_venue(store: &dyn Store, values: FormData) -> Result<Listed<Venue>> {
    let input = match NewVenue::from_form(&values) {
        Ok(input) => input,
        Err(errors) => return Err(invalid(FormKind::Venue, None, errors, values)),
    };
    let name = input.name.clone();

    match store.create_venue(input).await {
        Ok(venue) => {
            tracing::info!(id = venue.id, name = %venue.name, "venue listed");
            Ok(Listed {
                flash: Flash::success(format!("Venue {} was successfully listed!", name)),
                record: venue,
            })
        }
        Err(e) => Err(rolled_back(
            FormKind::Venue,
            None,
            format!("An error occurred. Venue {} could not be listed.", name),
            values,
            e,
        )),
    }
}

pub async fn venue_edit_form(store: &dyn Store, id: i64) -> Result<FormView> {
    let venue = store.get_venue(id).await?;
    Ok(FormView::new(FormKind::VenueEdit, &venue.to_form()).for_record(id))
}

/// Apply an edit to a venue. Returns the id to redirect to.
pub async fn update_venue(store: &dyn Store, id: i64, values: FormData) -> Result<i64> {
    store.get_venue(id).await?;

    let update = match VenueUpdate::from_form(&values) {
        Ok(update) => update,
        Err(errors) => return Err(invalid(FormKind::VenueEdit, Some(id), errors, values)),
    };

    match store.update_venue(id, &update).await {
        Ok(venue) => {
            tracing::info!(id, name = %venue.name, "venue updated");
            Ok(id)
        }
        Err(DbError::NotFound { resource, id }) => Err(ServiceError::NotFound { resource, id }),
        Err(e) => Err(rolled_back(
            FormKind::VenueEdit,
            Some(id),
            format!("An error occurred. Venue {} could not be updated.", update.name),
            values,
            e,
        )),
    }
}

/// Delete a venue and its shows. Every failure, a missing id included,
/// comes back as `success: false`.
pub async fn delete_venue(store: &dyn Store, id: i64) -> DeleteOutcome {
    match store.delete_venue(id).await {
        Ok(()) => {
            tracing::info!(id, "venue deleted");
            DeleteOutcome { success: true }
        }
        Err(DbError::NotFound { .. }) => {
            tracing::info!(id, "delete of unknown venue");
            DeleteOutcome { success: false }
        }
        Err(e) => {
            tracing::error!(id, error = %e, "venue delete rolled back");
            DeleteOutcome { success: false }
        }
    }
}

// ============================================================================
// Artists
// ============================================================================

pub async fn list_artists(store: &dyn Store) -> Result<Vec<ArtistListing>> {
    Ok(store.list_artists().await?)
}

pub async fn search_artists(
    store: &dyn Store,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults<NamedListing>> {
    let hits = store.search_artists(term, now).await?;
    Ok(SearchResults::new(term, hits))
}

pub async fn artist_detail(
    store: &dyn Store,
    id: i64,
    now: DateTime<Utc>,
    format: Option<DateFormat>,
) -> Result<ArtistDetail> {
    let artist = store.get_artist(id).await?;
    let shows = store.artist_shows(id).await?;
    let split = partition(shows, &now, |s| s.start_time);
    Ok(ArtistDetail::new(artist, split, format))
}

pub async fn create_artist(store: &dyn Store, values: FormData) -> Result<Listed<Artist>> {
    let input = match NewArtist::from_form(&values) {
        Ok(input) => input,
        Err(errors) => return Err(invalid(FormKind::Artist, None, errors, values)),
    };
    let name = input.name.clone();

    match store.create_artist(input).await {
        Ok(artist) => {
            tracing::info!(id = artist.id, name = %artist.name, "artist listed");
            Ok(Listed {
                flash: Flash::success(format!("Artist {} was successfully listed!", name)),
                record: artist,
            })
        }
        Err(e) => Err(rolled_back(
            FormKind::Artist,
            None,
            format!("An error occurred. Artist {} could not be listed.", name),
            values,
            e,
        )),
    }
}

pub async fn artist_edit_form(store: &dyn Store, id: i64) -> Result<FormView> {
    let artist = store.get_artist(id).await?;
    Ok(FormView::new(FormKind::ArtistEdit, &artist.to_form()).for_record(id))
}

pub async fn update_artist(store: &dyn Store, id: i64, values: FormData) -> Result<i64> {
    store.get_artist(id).await?;

    let update = match ArtistUpdate::from_form(&values) {
        Ok(update) => update,
        Err(errors) => return Err(invalid(FormKind::ArtistEdit, Some(id), errors, values)),
    };

    match store.update_artist(id, &update).await {
        Ok(artist) => {
            tracing::info!(id, name = %artist.name, "artist updated");
            Ok(id)
        }
        Err(DbError::NotFound { resource, id }) => Err(ServiceError::NotFound { resource, id }),
        Err(e) => Err(rolled_back(
            FormKind::ArtistEdit,
            Some(id),
            format!("An error occurred. Artist {} could not be updated.", update.name),
            values,
            e,
        )),
    }
}

// ============================================================================
// Shows
// ============================================================================

pub async fn list_shows(store: &dyn Store, format: Option<DateFormat>) -> Result<Vec<ShowView>> {
    let shows = store.list_shows().await?;
    Ok(shows.into_iter().map(|s| ShowView::new(s, format)).collect())
}

/// Empty show form with `start_time` preset to `now`.
pub fn show_form(now: DateTime<Utc>) -> FormView {
    let defaults = FormData::new().with("start_time", &timefmt::api_timestamp(&now));
    FormView::new(FormKind::Show, &defaults)
}

pub async fn create_show(store: &dyn Store, values: FormData) -> Result<Listed<Show>> {
    let input = match NewShow::from_form(&values) {
        Ok(input) => input,
        Err(errors) => return Err(invalid(FormKind::Show, None, errors, values)),
    };

    match store.create_show(input).await {
        Ok(show) => {
            tracing::info!(
                id = show.id,
                venue_id = show.venue_id,
                artist_id = show.artist_id,
                "show listed"
            );
            Ok(Listed {
                flash: Flash::success("Show was successfully listed!"),
                record: show,
            })
        }
        Err(DbError::MissingReference { field, id, .. }) => {
            let errors = FieldErrors::from(ValidationError::InvalidVariant {
                field,
                value: id.to_string(),
            });
            Err(invalid(FormKind::Show, None, errors, values))
        }
        Err(e) => Err(rolled_back(
            FormKind::Show,
            None,
            "An error occurred. Show could not be listed.".to_string(),
            values,
            e,
        )),
    }
}
