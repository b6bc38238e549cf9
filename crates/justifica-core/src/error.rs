//! Error types for `justifica-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("a student with matricula {0:?} already exists")]
  DuplicateStudentId(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Whether the error was caused by the caller's input rather than by the
  /// store or the server.
  pub fn is_bad_request(&self) -> bool {
    matches!(self, Self::Validation(_) | Self::DuplicateStudentId(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fail with [`Error::Validation`] if `value` is empty or only whitespace.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Validation(format!("`{field}` is required")));
  }
  Ok(())
}
