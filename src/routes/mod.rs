// src/routes/mod.rs

use axum::http::StatusCode;
use tracing::{error, warn};

use crate::calc::ModelError;
use crate::store::StoreError;

pub mod calculations;
pub mod health;
pub mod scenarios;

pub type ApiResult<T> = Result<T, (StatusCode, String)>;

// Common error mappers
pub fn internal_error<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("internal error: {e}"))
}

pub fn invalid_parameter(e: ModelError) -> (StatusCode, String) {
    warn!(field = e.field(), "rejected parameters: {e}");
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

pub fn store_error(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        StoreError::Conflict(_) => (StatusCode::CONFLICT, e.to_string()),
        other => internal_error(other),
    }
}
