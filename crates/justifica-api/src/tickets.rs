//! Handler for `POST /tickets`, the endpoint the ticket form submits to.
//!
//! A ticket is converted into a justification and stored like any other.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use justifica_core::{store::RecordStore, ticket::Ticket};

use crate::{envelope::Envelope, error::ApiError};

/// `POST /tickets`: body: `{"ticketName": "...", "entries": [...]}`.
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Ticket>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let Json(ticket) = body?;
  let input = ticket
    .to_justification()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
  let justification = store
    .insert_justification(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(
    id = %justification.id,
    entries = ticket.entries.len(),
    "ticket stored as justification"
  );
  Ok((
    StatusCode::CREATED,
    Json(Envelope::ok(justification).with_message("ticket received")),
  ))
}
