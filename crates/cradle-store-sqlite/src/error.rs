//! Error type for `cradle-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] cradle_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A write referenced a PCF that does not exist.
  #[error("PCF not found: {0}")]
  PcfNotFound(uuid::Uuid),

  #[error("PCF {0} already exists")]
  DuplicatePcf(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
