// handlers/mod.rs - two security tiers
//
// Public (no auth) serves the site; protected (admin JWT) serves the dashboard.
pub mod protected;
pub mod public;

use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;

use crate::error::ApiError;

/// Unwrap a JSON body, reporting malformed input in the error envelope
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}

impl Deleted {
    pub fn new(id: String) -> Self {
        Self { id, deleted: true }
    }
}
