//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Mirrors the source system's taxonomy: validation failures are caught
/// before any store call (400), missing records are 404, and store or blob
/// failures surface as 500. Failures are terminal for the request only; the
/// client may simply retry.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("blob i/o error: {0}")]
  Io(#[from] std::io::Error),
}

impl ApiError {
  /// Reject an empty (or whitespace-only) required field before any store
  /// call is made.
  pub fn require(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
      Err(ApiError::BadRequest(format!("{field} must not be empty")))
    } else {
      Ok(())
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
