//! Error type for `cradle-engine`.
//!
//! Every variant is fatal to an aggregation. Non-fatal conditions (missing
//! configuration, unweighable packaging) are [`Warning`](crate::Warning)s.

use thiserror::Error;
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to fetch materials: {0}")]
  MaterialsFetchFailed(#[source] BoxError),

  #[error("failed to fetch PCF record: {0}")]
  PcfFetchFailed(#[source] BoxError),

  #[error("failed to fetch product metadata: {0}")]
  ProductFetchFailed(#[source] BoxError),

  #[error("PCF not found: {0}")]
  PcfNotFound(Uuid),

  #[error("no materials found for PCF {0}")]
  NoMaterialsFound(Uuid),
}

impl Error {
  /// Whether the repository itself failed, as opposed to returning no data.
  pub fn is_fetch_failure(&self) -> bool {
    matches!(
      self,
      Self::MaterialsFetchFailed(_)
        | Self::PcfFetchFailed(_)
        | Self::ProductFetchFailed(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fetch_failures_are_told_apart_from_missing_data() {
    let offline = || -> BoxError { Box::new(std::io::Error::other("offline")) };
    assert!(Error::MaterialsFetchFailed(offline()).is_fetch_failure());
    assert!(Error::PcfFetchFailed(offline()).is_fetch_failure());
    assert!(Error::ProductFetchFailed(offline()).is_fetch_failure());
    assert!(!Error::PcfNotFound(Uuid::nil()).is_fetch_failure());
    assert!(!Error::NoMaterialsFound(Uuid::nil()).is_fetch_failure());
  }
}
