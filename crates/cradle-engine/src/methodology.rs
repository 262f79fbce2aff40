//! Methodology tables: every constant the engine multiplies by.
//!
//! The tables are plain structs owned by an [`Aggregator`](crate::Aggregator)
//! rather than module-level constants, so a deployment can swap in a new
//! characterisation (an IPCC update, a regional disposal study) through its
//! config file without touching call sites. Every struct deserialises with
//! per-field defaults; a partial override keeps the remaining defaults.

use std::collections::BTreeMap;

use cradle_core::{
  config::{CarbonationType, EolPathway},
  result::GwpFactors,
};
use serde::{Deserialize, Serialize};

/// The full set of factor tables used by one aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Methodology {
  pub gwp:         GwpFactors,
  pub use_phase:   UsePhaseFactors,
  pub end_of_life: EolFactorTable,
  pub grid:        GridIntensityTable,
}

// ─── Use phase ───────────────────────────────────────────────────────────────

/// Dissolved-CO2 release on opening, kg CO2 per litre of product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonationFactors {
  pub beer:            f64,
  pub cider:           f64,
  pub sparkling_wine:  f64,
  pub soft_drink:      f64,
  pub sparkling_water: f64,
}

impl Default for CarbonationFactors {
  fn default() -> Self {
    Self {
      beer:            0.005,
      cider:           0.005,
      sparkling_wine:  0.012,
      soft_drink:      0.007,
      sparkling_water: 0.006,
    }
  }
}

impl CarbonationFactors {
  pub fn factor(&self, kind: CarbonationType) -> f64 {
    match kind {
      CarbonationType::Beer => self.beer,
      CarbonationType::Cider => self.cider,
      CarbonationType::SparklingWine => self.sparkling_wine,
      CarbonationType::SoftDrink => self.soft_drink,
      CarbonationType::SparklingWater => self.sparkling_water,
    }
  }
}

/// Energy and loss factors for the consumer use phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsePhaseFactors {
  /// kWh to keep one litre chilled for one day in an open retail chiller.
  pub retail_kwh_per_litre_day:   f64,
  /// kWh to keep one litre chilled for one day in a domestic fridge.
  pub domestic_kwh_per_litre_day: f64,
  pub carbonation:                CarbonationFactors,
  /// Applied when a product is carbonated but declares no type.
  pub default_carbonation:        CarbonationType,
}

impl Default for UsePhaseFactors {
  fn default() -> Self {
    Self {
      retail_kwh_per_litre_day:   0.0025,
      domestic_kwh_per_litre_day: 0.0014,
      carbonation:                CarbonationFactors::default(),
      default_carbonation:        CarbonationType::SoftDrink,
    }
  }
}

// ─── Grid intensity ──────────────────────────────────────────────────────────

/// Electricity grid carbon intensity lookup, kg CO2e per kWh.
pub trait GridIntensity {
  fn kg_co2e_per_kwh(&self, country_code: &str) -> f64;
}

/// Table-backed grid intensities keyed by ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridIntensityTable {
  pub countries:      BTreeMap<String, f64>,
  /// Used for codes missing from `countries`.
  pub global_average: f64,
}

impl Default for GridIntensityTable {
  fn default() -> Self {
    let countries = [
      ("AU", 0.66),
      ("BE", 0.16),
      ("CA", 0.13),
      ("CH", 0.03),
      ("CN", 0.58),
      ("DE", 0.38),
      ("DK", 0.15),
      ("ES", 0.15),
      ("FR", 0.056),
      ("GB", 0.207),
      ("IE", 0.296),
      ("IN", 0.71),
      ("IT", 0.26),
      ("JP", 0.47),
      ("NL", 0.33),
      ("NO", 0.008),
      ("NZ", 0.11),
      ("PL", 0.66),
      ("SE", 0.013),
      ("US", 0.386),
      ("ZA", 0.90),
    ]
    .into_iter()
    .map(|(code, kg)| (code.to_owned(), kg))
    .collect();

    Self { countries, global_average: 0.475 }
  }
}

impl GridIntensity for GridIntensityTable {
  fn kg_co2e_per_kwh(&self, country_code: &str) -> f64 {
    let code = country_code.trim().to_ascii_uppercase();
    // `UK` is the common non-ISO spelling.
    let code = if code == "UK" { "GB".to_owned() } else { code };
    // Keys from config files may arrive lower-cased.
    self
      .countries
      .get(&code)
      .or_else(|| {
        self
          .countries
          .iter()
          .find(|(k, _)| k.eq_ignore_ascii_case(&code))
          .map(|(_, v)| v)
      })
      .copied()
      .unwrap_or(self.global_average)
  }
}

// ─── End of life ─────────────────────────────────────────────────────────────

/// kg CO2e per kg of material sent down each pathway. Recycling factors are
/// negative: they are net avoided-burden credits for displaced virgin
/// production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayFactors {
  pub recycling:           f64,
  pub landfill:            f64,
  pub incineration:        f64,
  pub composting:          f64,
  pub anaerobic_digestion: f64,
}

impl PathwayFactors {
  pub fn factor(&self, pathway: EolPathway) -> f64 {
    match pathway {
      EolPathway::Recycling => self.recycling,
      EolPathway::Landfill => self.landfill,
      EolPathway::Incineration => self.incineration,
      EolPathway::Composting => self.composting,
      EolPathway::AnaerobicDigestion => self.anaerobic_digestion,
    }
  }
}

/// Pathway factors per packaging category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EolFactorTable {
  pub categories: BTreeMap<String, PathwayFactors>,
  /// Used for categories missing from `categories`.
  pub other:      PathwayFactors,
}

impl Default for EolFactorTable {
  fn default() -> Self {
    let row = |recycling, landfill, incineration, composting, anaerobic_digestion| {
      PathwayFactors {
        recycling,
        landfill,
        incineration,
        composting,
        anaerobic_digestion,
      }
    };

    let categories = [
      ("aluminium", row(-8.5, 0.02, 0.03, 0.0, 0.0)),
      ("steel", row(-1.6, 0.02, 0.03, 0.0, 0.0)),
      ("glass", row(-0.35, 0.01, 0.02, 0.0, 0.0)),
      ("paper", row(-0.45, 0.95, 0.05, 0.18, 0.06)),
      ("cardboard", row(-0.5, 0.95, 0.05, 0.18, 0.06)),
      ("plastic", row(-1.4, 0.05, 2.3, 0.05, 0.05)),
      ("wood", row(-0.15, 0.6, 0.03, 0.1, 0.05)),
    ]
    .into_iter()
    .map(|(name, factors)| (name.to_owned(), factors))
    .collect();

    Self { categories, other: row(0.0, 0.5, 1.0, 0.1, 0.05) }
  }
}

impl EolFactorTable {
  /// Factors for `category`, falling back to `other`.
  pub fn for_category(&self, category: &str) -> &PathwayFactors {
    let key = canonical_category(category);
    self.categories.get(&key).unwrap_or(&self.other)
  }
}

/// Lowercase, trimmed, with US spellings folded onto the table's keys.
fn canonical_category(category: &str) -> String {
  let key = category.trim().to_ascii_lowercase();
  match key.as_str() {
    "aluminum" => "aluminium".to_owned(),
    "paperboard" | "carton" => "cardboard".to_owned(),
    "pet" | "hdpe" | "ldpe" | "pp" => "plastic".to_owned(),
    _ => key,
  }
}
