//! Route handlers organized by resource

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::service::Listed;

/// 201 body for a freshly listed record: `{flash, <key>: record}`.
pub(crate) fn created<T: Serialize>(key: &str, listed: Listed<T>) -> (StatusCode, Json<Value>) {
    let mut body = json!({ "flash": listed.flash });
    body[key] = json!(listed.record);
    (StatusCode::CREATED, Json(body))
}
