//! Error types for `cradle-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown quantity unit: {0:?}")]
  UnknownUnit(String),

  #[error("unknown data quality grade: {0:?}")]
  UnknownGrade(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
