//! Cradle server: configuration, application assembly and bulk import.
//!
//! The `cradle` binary in `main.rs` is a thin shell over this library.

pub mod import;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use cradle_engine::{Aggregator, Methodology};
use cradle_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime configuration, from `cradle.toml` and `CRADLE_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store_path:  PathBuf,
  /// Factor tables; any table left out keeps its built-in values.
  #[serde(default)]
  pub methodology: Methodology,
}

impl ServerConfig {
  /// Layer defaults, the optional file at `path`, then the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("store_path", "~/.local/share/cradle/cradle.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CRADLE"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application ─────────────────────────────────────────────────────────────

/// The HTTP application: the API under `/api`, with request tracing.
pub fn app(store: Arc<SqliteStore>, methodology: Methodology) -> Router {
  Router::new()
    .nest("/api", cradle_api::api_router(store, Aggregator::new(methodology)))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests;
