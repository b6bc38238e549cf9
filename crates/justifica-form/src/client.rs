//! Async HTTP client for the Justifica record API.

use anyhow::{Context, Result, anyhow};
use justifica_core::{justification::Justification, ticket::Ticket};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the record API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// The success side of the server's response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
  data: T,
}

/// Async HTTP client for the record API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `POST /tickets`: one request, no retry.
  pub async fn submit_ticket(&self, ticket: &Ticket) -> Result<Justification> {
    let resp = self
      .client
      .post(self.url("/tickets"))
      .json(ticket)
      .send()
      .await
      .context("POST /tickets failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /tickets → {}", resp.status()));
    }
    let envelope: Envelope<Justification> =
      resp.json().await.context("deserialising created justification")?;
    Ok(envelope.data)
  }

  /// `GET /justifications` or `GET /justifications/student/<id>`
  pub async fn list_justifications(
    &self,
    student_id: Option<&str>,
  ) -> Result<Vec<Justification>> {
    let path = match student_id {
      Some(id) => format!("/justifications/student/{id}"),
      None => "/justifications".to_string(),
    };
    let resp = self
      .client
      .get(self.url(&path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {path} → {}", resp.status()));
    }
    let envelope: Envelope<Vec<Justification>> =
      resp.json().await.context("deserialising justifications")?;
    Ok(envelope.data)
  }
}
