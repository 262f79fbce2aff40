//! System boundary tiers: the life-stage cutoff of an assessment.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// The declared cutoff point of a footprint, ordered by inclusiveness:
/// `cradle-to-gate` ⊂ `cradle-to-shelf` ⊂ `cradle-to-consumer` ⊂
/// `cradle-to-grave`.
///
/// The derived `Ord` follows declaration order, so `a <= b` reads as "`a` is
/// no more inclusive than `b`".
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SystemBoundary {
  /// Raw materials through the factory gate.
  #[default]
  CradleToGate,
  /// Adds distribution to the retail shelf.
  CradleToShelf,
  /// Adds the consumer use phase (refrigeration, carbonation losses).
  CradleToConsumer,
  /// Adds end-of-life treatment of packaging.
  CradleToGrave,
}

impl SystemBoundary {
  /// Parse a stored or user-supplied boundary string.
  ///
  /// Accepts kebab- or snake-case in any letter case. Anything unrecognised
  /// (including the empty string) falls back to [`SystemBoundary::CradleToGate`],
  /// the least inclusive tier.
  pub fn parse_or_default(raw: &str) -> Self {
    raw.trim().replace('_', "-").parse().unwrap_or_default()
  }

  /// Whether the use phase is part of this boundary.
  pub fn includes_use_phase(self) -> bool { self >= Self::CradleToConsumer }

  /// Whether end-of-life treatment is part of this boundary.
  pub fn includes_end_of_life(self) -> bool { self >= Self::CradleToGrave }
}
