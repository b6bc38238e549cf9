//! The service description served at `/` and the catch-all 404.

use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::{envelope::Envelope, error::ApiError};

#[derive(Debug, Serialize)]
pub struct Endpoint {
  pub method:      &'static str,
  pub path:        &'static str,
  pub description: &'static str,
}

const fn ep(method: &'static str, path: &'static str, description: &'static str) -> Endpoint {
  Endpoint { method, path, description }
}

/// Every route served by [`crate::api_router`].
pub const ENDPOINTS: &[Endpoint] = &[
  ep("GET", "/students", "List all students"),
  ep("GET", "/students/id/{id}", "Get a student by matricula"),
  ep("GET", "/students/search/{name}", "Search students by name (case-insensitive)"),
  ep("POST", "/students", "Create a student"),
  ep("GET", "/teachers", "List all teachers"),
  ep("GET", "/teachers/{id}", "Get a teacher by id"),
  ep("POST", "/teachers", "Create a teacher"),
  ep("GET", "/groups", "List all groups"),
  ep("GET", "/groups/{id}", "Get a group by id"),
  ep("GET", "/groups/student/{studentId}", "List the groups a student is enrolled in"),
  ep("POST", "/groups", "Create a group"),
  ep("GET", "/justifications", "List all justifications, newest first"),
  ep("GET", "/justifications/{id}", "Get a justification by id"),
  ep("GET", "/justifications/student/{studentId}", "List a student's justifications, newest first"),
  ep("POST", "/justifications", "Create a justification"),
  ep("PUT", "/justifications/{id}", "Replace a justification"),
  ep("DELETE", "/justifications/{id}", "Delete a justification"),
  ep("POST", "/tickets", "Submit an absence ticket from the form"),
];

/// `GET /`
pub async fn describe() -> Json<Envelope<serde_json::Value>> {
  Json(
    Envelope::ok(json!({
      "name": "justifica",
      "version": env!("CARGO_PKG_VERSION"),
      "endpoints": ENDPOINTS,
    }))
    .with_message("Attendance justification API"),
  )
}

/// Fallback for unknown paths and for known paths hit with an unsupported
/// method.
pub async fn not_found() -> ApiError { ApiError::RouteNotFound }
