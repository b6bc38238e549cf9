//! Handlers for `/students` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/students` | All students |
//! | `GET`  | `/students/id/:id` | Exact `matricula`; 404 if not found |
//! | `GET`  | `/students/search/:name` | Case-insensitive substring on `nombre` |
//! | `POST` | `/students` | Body: [`Student`]; 400 on duplicate `matricula` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use justifica_core::{store::RecordStore, student::Student};

use crate::{envelope::Envelope, error::ApiError};

/// `GET /students`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<Student>>>, ApiError>
where
  S: RecordStore,
{
  let students = store.list_students().await.map_err(ApiError::store)?;
  Ok(Json(Envelope::list(students)))
}

/// `GET /students/id/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<Student>>, ApiError>
where
  S: RecordStore,
{
  let student = store
    .get_student(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(Envelope::ok(student)))
}

/// `GET /students/search/:name`
pub async fn search<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<Envelope<Vec<Student>>>, ApiError>
where
  S: RecordStore,
{
  let students = store.search_students(&name).await.map_err(ApiError::store)?;
  Ok(Json(Envelope::list(students)))
}

/// `POST /students`: returns 201 + the stored student.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Student>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let Json(body) = body?;
  let student = store.insert_student(body).await.map_err(ApiError::store)?;
  tracing::info!(matricula = %student.student_id, "student created");
  Ok((
    StatusCode::CREATED,
    Json(Envelope::ok(student).with_message("student created")),
  ))
}
