//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use justifica_core::store::StoreError;
use thiserror::Error;

use crate::envelope::Envelope;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("Route not found")]
  RouteNotFound,

  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store failure: rejected input becomes a 400, anything else
  /// is passed through as a 500 with the store's own message.
  pub fn store<E: StoreError>(e: E) -> Self {
    if e.as_core().is_some_and(justifica_core::Error::is_bad_request) {
      ApiError::BadRequest(e.to_string())
    } else {
      tracing::error!(error = %e, "store operation failed");
      ApiError::Store(Box::new(e))
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(Envelope::error(self.to_string()))).into_response()
  }
}
