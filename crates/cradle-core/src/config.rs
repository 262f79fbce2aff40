//! Caller-supplied lifecycle configuration for the downstream stages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── Use phase ───────────────────────────────────────────────────────────────

/// How a carbonated product loses its dissolved CO2 once opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbonationType {
  Beer,
  Cider,
  SparklingWine,
  SoftDrink,
  SparklingWater,
}

/// Consumer-side behaviour of the product. Only consulted for
/// `cradle-to-consumer` and `cradle-to-grave` assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsePhaseConfig {
  #[serde(default)]
  pub needs_refrigeration:        bool,
  #[serde(default)]
  pub refrigeration_days:         f64,
  /// Share of the refrigerated days spent in retail chillers (0–1); the
  /// remainder is spent in the consumer's home.
  #[serde(default)]
  pub retail_refrigeration_split: f64,
  #[serde(default)]
  pub is_carbonated:              bool,
  #[serde(default)]
  pub carbonation_type:           Option<CarbonationType>,
  /// ISO 3166-1 alpha-2 code used for the grid intensity lookup.
  #[serde(default)]
  pub consumer_country_code:      String,
}

// ─── End of life ─────────────────────────────────────────────────────────────

/// A disposal route for packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EolPathway {
  Recycling,
  Landfill,
  Incineration,
  Composting,
  AnaerobicDigestion,
}

/// Percentage (0–100) of a packaging category sent down each pathway.
/// Expected, but not required, to sum to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayShares {
  pub recycling:           f64,
  pub landfill:            f64,
  pub incineration:        f64,
  pub composting:          f64,
  pub anaerobic_digestion: f64,
}

impl PathwayShares {
  pub fn iter(&self) -> impl Iterator<Item = (EolPathway, f64)> {
    [
      (EolPathway::Recycling, self.recycling),
      (EolPathway::Landfill, self.landfill),
      (EolPathway::Incineration, self.incineration),
      (EolPathway::Composting, self.composting),
      (EolPathway::AnaerobicDigestion, self.anaerobic_digestion),
    ]
    .into_iter()
  }

  pub fn total(&self) -> f64 { self.iter().map(|(_, share)| share).sum() }
}

/// Regional disposal profile. Only consulted for `cradle-to-grave`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndOfLifeConfig {
  #[serde(default)]
  pub region:   String,
  /// Keyed by packaging category (`aluminium`, `glass`, `paper`, …).
  #[serde(default)]
  pub pathways: BTreeMap<String, PathwayShares>,
}

impl EndOfLifeConfig {
  /// Shares for `category`, matched case-insensitively.
  pub fn shares_for(&self, category: &str) -> Option<&PathwayShares> {
    let wanted = category.trim();
    self
      .pathways
      .iter()
      .find(|(key, _)| key.trim().eq_ignore_ascii_case(wanted))
      .map(|(_, shares)| shares)
  }
}
