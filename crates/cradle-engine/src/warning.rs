//! Non-fatal conditions surfaced in `AggregationResult::warnings`.

use std::fmt;

use cradle_core::boundary::SystemBoundary;

/// A condition that degraded part of an aggregation without failing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
  /// The boundary includes the use phase but no `usePhaseConfig` was given.
  MissingUsePhaseConfig { boundary: SystemBoundary },
  /// The boundary includes end of life but no `eolConfig` was given.
  MissingEolConfig { boundary: SystemBoundary },
  /// The product's unit size could not be read as a volume.
  UnknownProductVolume,
  /// A packaging row is counted in units, so it cannot be weighed.
  UnweighablePackaging { name: String },
}

impl fmt::Display for Warning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingUsePhaseConfig { boundary } => write!(
        f,
        "usePhaseConfig not provided for {boundary} boundary; use phase impact set to 0"
      ),
      Self::MissingEolConfig { boundary } => write!(
        f,
        "eolConfig not provided for {boundary} boundary; end-of-life impact set to 0"
      ),
      Self::UnknownProductVolume => write!(
        f,
        "product unit size is missing or not a volume; use phase impact set to 0"
      ),
      Self::UnweighablePackaging { name } => write!(
        f,
        "packaging {name:?} is counted in units and has no mass; excluded from end of life"
      ),
    }
  }
}
