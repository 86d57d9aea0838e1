//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Form failures echo the submitted values so the form can be redisplayed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use gigbook_core::{FieldErrors, FormData};

use crate::service::ServiceError;
use crate::store::DbError;
use crate::views::{Flash, FormKind, FormView};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Form failed validation (400)
    Invalid { form: FormView, errors: FieldErrors },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Write rolled back, user-facing flash (500)
    Persistence { form: FormView, flash: Flash },

    /// Request the extractors could not read (status from the rejection)
    Rejected { status: StatusCode, message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500)
    Internal { message: String },
}

fn internal_body() -> serde_json::Value {
    json!({
        "error": "internal_error",
        "message": "an internal error occurred"
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Invalid { form, errors } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": errors.to_string(),
                    "errors": errors,
                    "form": form
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Persistence { form, flash } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "persistence_error",
                    "message": flash.message,
                    "flash": flash,
                    "form": form
                }),
            ),
            Self::Rejected { status, message } => (
                status,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, internal_body())
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, internal_body())
            }
        };

        (status, Json(body)).into_response()
    }
}

fn form_view(kind: FormKind, record_id: Option<i64>, values: &FormData) -> FormView {
    let view = FormView::new(kind, values);
    match record_id {
        Some(id) => view.for_record(id),
        None => view,
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Invalid {
                form,
                record_id,
                errors,
                values,
            } => Self::Invalid {
                form: form_view(form, record_id, &values),
                errors,
            },
            ServiceError::NotFound { resource, id } => Self::NotFound {
                resource,
                id: id.to_string(),
            },
            ServiceError::Persistence {
                form,
                record_id,
                flash,
                values,
                ..
            } => Self::Persistence {
                form: form_view(form, record_id, &values),
                flash: Flash::error(flash),
            },
            ServiceError::Db(e) => e.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound {
                resource,
                id: id.to_string(),
            },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use gigbook_core::ValidationError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400_with_values() {
        let err: ApiError = ServiceError::Invalid {
            form: FormKind::Venue,
            record_id: None,
            errors: ValidationError::Empty { field: "city" }.into(),
            values: FormData::new().with("name", "The Musical Hop"),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["errors"][0]["field"], "city");
        assert_eq!(body["form"]["fields"][0]["values"][0], "The Musical Hop");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err: ApiError = DbError::NotFound {
            resource: "venue",
            id: 3,
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "venue '3' not found");
    }

    #[tokio::test]
    async fn persistence_failure_shows_flash_only() {
        let err: ApiError = ServiceError::Persistence {
            form: FormKind::Artist,
            record_id: None,
            flash: "An error occurred. Artist X could not be listed.".into(),
            values: FormData::new(),
            source: DbError::Rejected("disk on fire".into()),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["flash"]["category"], "error");
        assert!(!body.to_string().contains("disk on fire"));
    }

    #[tokio::test]
    async fn failed_edit_names_the_record() {
        let err: ApiError = ServiceError::Invalid {
            form: FormKind::VenueEdit,
            record_id: Some(4),
            errors: ValidationError::Empty { field: "name" }.into(),
            values: FormData::new().with("city", "San Francisco"),
        }
        .into();
        let body = body_json(err.into_response()).await;
        assert_eq!(body["form"]["form"], "venue_edit");
        assert_eq!(body["form"]["record_id"], 4);
    }

    #[tokio::test]
    async fn rejected_request_keeps_status_and_json_shape() {
        let err = ApiError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "expected a form body".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = body_json(response).await;
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["message"], "expected a form body");
    }

    #[tokio::test]
    async fn database_error_hides_detail() {
        let err: ApiError = DbError::Rejected("secret detail".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert!(!body.to_string().contains("secret detail"));
    }
}
