//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the optional TOML
//! file, then `JUSTIFICA_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// Where the records live: a SQLite file path, optionally prefixed with
  /// `sqlite://`, or `:memory:`.
  pub database_url: String,
}

impl ServerConfig {
  /// Load from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    defaults()?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("JUSTIFICA"))
      .build()?
      .try_deserialize()
  }

  /// The filesystem path handed to the SQLite store.
  pub fn store_path(&self) -> PathBuf {
    let url = self.database_url.as_str();
    let path = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);
    PathBuf::from(path)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
  Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 3000)?
    .set_default("database_url", "justifica.db")
}
