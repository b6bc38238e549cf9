//! Handlers for `/teachers` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use justifica_core::{store::RecordStore, teacher::Teacher};

use crate::{envelope::Envelope, error::ApiError};

/// `GET /teachers`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<Teacher>>>, ApiError>
where
  S: RecordStore,
{
  let teachers = store.list_teachers().await.map_err(ApiError::store)?;
  Ok(Json(Envelope::list(teachers)))
}

/// `GET /teachers/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<Teacher>>, ApiError>
where
  S: RecordStore,
{
  let teacher = store
    .get_teacher(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("teacher {id} not found")))?;
  Ok(Json(Envelope::ok(teacher)))
}

/// `POST /teachers`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Teacher>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let Json(body) = body?;
  let teacher = store.insert_teacher(body).await.map_err(ApiError::store)?;
  tracing::info!(id_maestro = %teacher.teacher_id, "teacher created");
  Ok((
    StatusCode::CREATED,
    Json(Envelope::ok(teacher).with_message("teacher created")),
  ))
}
