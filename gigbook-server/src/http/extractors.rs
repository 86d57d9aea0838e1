//! Custom Axum extractors
//!
//! Each one rejects with `ApiError`, so malformed requests get the same
//! JSON `{error, message}` body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Form;
use serde::Deserialize;

use gigbook_core::{DateFormat, FormData};

use super::error::ApiError;

/// Positive integer id taken from the path.
///
/// Anything that is not one cannot name a record, so it is a 404 rather
/// than a validation error.
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound {
                resource: "record",
                id: String::new(),
            })?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ApiError::NotFound {
                resource: "record",
                id: raw,
            }),
        }
    }
}

/// Urlencoded form body.
pub struct FormBody(pub FormData);

impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(form) = Form::<FormData>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        Ok(Self(form))
    }
}

#[derive(Debug, Default, Deserialize)]
struct DisplayParams {
    format: Option<DateFormat>,
}

/// `?format=medium|full` on pages that list shows.
pub struct DisplayFormat(pub Option<DateFormat>);

impl<S> FromRequestParts<S> for DisplayFormat
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<DisplayParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        Ok(Self(params.format))
    }
}
