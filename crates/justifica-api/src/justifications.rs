//! Handlers for `/justifications` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/justifications` | Newest first |
//! | `GET`    | `/justifications/:id` | 404 if absent or not a valid id |
//! | `GET`    | `/justifications/student/:student_id` | Newest first |
//! | `POST`   | `/justifications` | Body: [`NewJustification`]; returns 201 |
//! | `PUT`    | `/justifications/:id` | Full replace; returns the new document |
//! | `DELETE` | `/justifications/:id` | Returns the deleted document |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use justifica_core::{
  justification::{Justification, NewJustification},
  store::RecordStore,
};
use uuid::Uuid;

use crate::{envelope::Envelope, error::ApiError};

/// A malformed id can never name a stored document, so it is reported the
/// same way as a missing one.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| not_found(raw))
}

fn not_found(id: impl std::fmt::Display) -> ApiError {
  ApiError::NotFound(format!("justification {id} not found"))
}

// ─── Reads ────────────────────────────────────────────────────────────────────

/// `GET /justifications`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<Justification>>>, ApiError>
where
  S: RecordStore,
{
  let all = store.list_justifications().await.map_err(ApiError::store)?;
  Ok(Json(Envelope::list(all)))
}

/// `GET /justifications/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Envelope<Justification>>, ApiError>
where
  S: RecordStore,
{
  let id = parse_id(&raw_id)?;
  let justification = store
    .get_justification(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(Envelope::ok(justification)))
}

/// `GET /justifications/student/:student_id`
pub async fn for_student<S>(
  State(store): State<Arc<S>>,
  Path(student_id): Path<String>,
) -> Result<Json<Envelope<Vec<Justification>>>, ApiError>
where
  S: RecordStore,
{
  let found = store
    .justifications_for_student(&student_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Envelope::list(found)))
}

// ─── Writes ───────────────────────────────────────────────────────────────────

/// `POST /justifications`: returns 201 + the stored justification.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewJustification>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let Json(body) = body?;
  let justification = store
    .insert_justification(body)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = %justification.id, "justification created");
  Ok((
    StatusCode::CREATED,
    Json(Envelope::ok(justification).with_message("justification created")),
  ))
}

/// `PUT /justifications/:id`
pub async fn replace<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
  body: Result<Json<NewJustification>, JsonRejection>,
) -> Result<Json<Envelope<Justification>>, ApiError>
where
  S: RecordStore,
{
  let id = parse_id(&raw_id)?;
  let Json(body) = body?;
  let justification = store
    .replace_justification(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(%id, "justification updated");
  Ok(Json(
    Envelope::ok(justification).with_message("justification updated"),
  ))
}

/// `DELETE /justifications/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Envelope<Justification>>, ApiError>
where
  S: RecordStore,
{
  let id = parse_id(&raw_id)?;
  let justification = store
    .delete_justification(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(%id, "justification deleted");
  Ok(Json(
    Envelope::ok(justification).with_message("justification deleted"),
  ))
}
