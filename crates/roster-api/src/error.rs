//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request could not be decoded (e.g. a malformed JSON body).
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Service(#[from] CoreError),
}

// Extractor rejections are reported as 400 with the same JSON body as every
// other error, never axum's plain-text default.

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Service(CoreError::Validation(violations)) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": self.to_string(), "violations": violations }),
      ),
      ApiError::Service(CoreError::Conflict { .. }) => {
        (StatusCode::CONFLICT, json!({ "error": self.to_string() }))
      }
      ApiError::Service(CoreError::NotFound(_)) => {
        (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
      }
      ApiError::Service(CoreError::Store(e)) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "error": "internal server error" }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
