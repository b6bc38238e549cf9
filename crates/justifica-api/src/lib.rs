//! JSON REST API for Justifica.
//!
//! Exposes an axum [`Router`] backed by any
//! [`justifica_core::store::RecordStore`]. CORS, tracing and transport
//! concerns are the caller's responsibility.
//!
//! Every response body is an [`Envelope`].

pub mod envelope;
pub mod error;
pub mod groups;
pub mod justifications;
pub mod root;
pub mod students;
pub mod teachers;
pub mod tickets;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use justifica_core::store::RecordStore;

pub use envelope::Envelope;
pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Unknown routes, and known routes with the wrong
/// method, answer 404 with the generic not-found envelope.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/", get(root::describe))
    // Students
    .route("/students", get(students::list::<S>).post(students::create::<S>))
    .route("/students/id/{id}", get(students::get_one::<S>))
    .route("/students/search/{name}", get(students::search::<S>))
    // Teachers
    .route("/teachers", get(teachers::list::<S>).post(teachers::create::<S>))
    .route("/teachers/{id}", get(teachers::get_one::<S>))
    // Groups
    .route("/groups", get(groups::list::<S>).post(groups::create::<S>))
    .route("/groups/{id}", get(groups::get_one::<S>))
    .route("/groups/student/{student_id}", get(groups::for_student::<S>))
    // Justifications
    .route(
      "/justifications",
      get(justifications::list::<S>).post(justifications::create::<S>),
    )
    .route(
      "/justifications/{id}",
      get(justifications::get_one::<S>)
        .put(justifications::replace::<S>)
        .delete(justifications::delete_one::<S>),
    )
    .route(
      "/justifications/student/{student_id}",
      get(justifications::for_student::<S>),
    )
    // Form submissions
    .route("/tickets", post(tickets::submit::<S>))
    .fallback(root::not_found)
    .method_not_allowed_fallback(root::not_found)
    .with_state(store)
}
