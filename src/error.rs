//! Error taxonomy for the generation core.
//!
//! Only `InvalidArgument` ever reaches a caller: model and parse failures
//! are recovered locally via fallbacks, and missing quiz ids surface as a
//! negative grading result rather than an error.

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
  /// Caller-supplied precondition violated; surfaced, never retried.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  /// Model call failed, timed out, or no model is configured.
  #[error("model unavailable: {0}")]
  ModelUnavailable(String),

  /// Model responded but the output did not match the expected shape.
  #[error("parse failure: {0}")]
  ParseFailure(String),

  /// Referenced entity does not exist.
  #[error("not found: {0}")]
  NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody {
  error: String,
}

impl IntoResponse for GenError {
  fn into_response(self) -> Response {
    let status = match &self {
      GenError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
      GenError::NotFound(_) => StatusCode::NOT_FOUND,
      GenError::ModelUnavailable(_) | GenError::ParseFailure(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(ErrorBody { error: self.to_string() })).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_argument_maps_to_400() {
    let resp = GenError::InvalidArgument("dailyHours must be >= 2".into()).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn not_found_maps_to_404() {
    let resp = GenError::NotFound("bogus-id".into()).into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
