//! HTTP server for the Justifica record API.
//!
//! Wraps [`justifica_api::api_router`] with request tracing and permissive
//! CORS so the ticket form can call it from any origin.

pub mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use axum::Router;
use justifica_core::store::RecordStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete application router for `store`.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: RecordStore + 'static,
{
  justifica_api::api_router(store)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

// ─── Integration tests ────────────────────────────────────────────────────────
