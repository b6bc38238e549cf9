//! Handlers for `/groups` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/groups` | All groups |
//! | `GET`  | `/groups/:id` | Exact `id_grupo`; 404 if not found |
//! | `GET`  | `/groups/student/:student_id` | Groups whose roster lists the student |
//! | `POST` | `/groups` | Body: [`Group`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use justifica_core::{group::Group, store::RecordStore};

use crate::{envelope::Envelope, error::ApiError};

/// `GET /groups`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<Group>>>, ApiError>
where
  S: RecordStore,
{
  let groups = store.list_groups().await.map_err(ApiError::store)?;
  Ok(Json(Envelope::list(groups)))
}

/// `GET /groups/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<Group>>, ApiError>
where
  S: RecordStore,
{
  let group = store
    .get_group(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("group {id} not found")))?;
  Ok(Json(Envelope::ok(group)))
}

/// `GET /groups/student/:student_id`
pub async fn for_student<S>(
  State(store): State<Arc<S>>,
  Path(student_id): Path<String>,
) -> Result<Json<Envelope<Vec<Group>>>, ApiError>
where
  S: RecordStore,
{
  let groups = store
    .groups_for_student(&student_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Envelope::list(groups)))
}

/// `POST /groups`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Group>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let Json(body) = body?;
  let group = store.insert_group(body).await.map_err(ApiError::store)?;
  tracing::info!(id_grupo = %group.group_id, "group created");
  Ok((
    StatusCode::CREATED,
    Json(Envelope::ok(group).with_message("group created")),
  ))
}
