//! Material impact rows: the fundamental input of a footprint.
//!
//! A row is one ingredient, packaging item, or process addition on a product's
//! bill of materials, already carrying the impact values resolved for its
//! quantity. Rows are produced upstream and are read-only to the engine.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Classification ──────────────────────────────────────────────────────────

/// What a material row physically represents.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
  #[default]
  Ingredient,
  Packaging,
  /// A synthetic row standing for a processing step (maturation, bottling
  /// energy, …) rather than a physical input.
  ProcessAddition,
}

/// The lifecycle stage a material's impact is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
  RawMaterials,
  Packaging,
  Processing,
  UsePhase,
  EndOfLife,
}

impl MaterialKind {
  /// Lenient parse of the loosely-typed `material_type` column.
  ///
  /// Returns `None` for anything that is not a recognised kind so callers can
  /// apply their own default.
  pub fn from_stored(raw: &str) -> Option<Self> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
      "ingredient" | "ingredients" => Some(Self::Ingredient),
      "packaging" => Some(Self::Packaging),
      "process_addition" | "process" => Some(Self::ProcessAddition),
      _ => None,
    }
  }

  /// The stage this kind of row reports under.
  pub fn lifecycle_stage(self) -> LifecycleStage {
    match self {
      Self::Ingredient => LifecycleStage::RawMaterials,
      Self::Packaging => LifecycleStage::Packaging,
      Self::ProcessAddition => LifecycleStage::Processing,
    }
  }
}

/// Whether `name` carries the synthetic process-addition marker: a leading
/// bracketed tag such as `"[Maturation] Oak cask"`.
pub fn has_process_marker(name: &str) -> bool {
  let Some(rest) = name.trim_start().strip_prefix('[') else {
    return false;
  };
  match rest.find(']') {
    Some(end) => rest[..end].chars().any(char::is_alphabetic),
    None => false,
  }
}

// ─── Quantity ────────────────────────────────────────────────────────────────

/// Unit of a material's declared quantity.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum QuantityUnit {
  #[serde(rename = "kg")]
  #[strum(to_string = "kg", serialize = "kilogram", serialize = "kilograms")]
  Kg,
  #[serde(rename = "g")]
  #[strum(to_string = "g", serialize = "gram", serialize = "grams")]
  G,
  #[serde(rename = "L", alias = "l")]
  #[strum(to_string = "L", serialize = "litre", serialize = "liter")]
  L,
  #[serde(rename = "ml", alias = "mL")]
  #[strum(to_string = "ml")]
  Ml,
  #[serde(rename = "unit", alias = "units")]
  #[strum(to_string = "unit", serialize = "units", serialize = "each")]
  Unit,
}

impl QuantityUnit {
  pub fn parse(raw: &str) -> Result<Self> {
    raw.trim().parse().map_err(|_| Error::UnknownUnit(raw.to_owned()))
  }

  /// Mass in kilograms of `quantity` of this unit, taking liquids at
  /// 1 kg/L. Counted units have no intrinsic mass and return `None`.
  pub fn mass_kg(self, quantity: f64) -> Option<f64> {
    match self {
      Self::Kg | Self::L => Some(quantity),
      Self::G | Self::Ml => Some(quantity / 1000.0),
      Self::Unit => None,
    }
  }
}

// ─── Impact values ───────────────────────────────────────────────────────────

/// Climate impact of a row in kg CO2e, with its origin split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateImpact {
  /// Total GWP100, transport included.
  pub total:           f64,
  pub fossil:          f64,
  pub biogenic:        f64,
  /// Direct land-use change.
  pub land_use_change: f64,
}

/// Secondary midpoint indicators carried alongside the headline categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MidpointIndicators {
  /// mol H+ eq.
  pub acidification:                 f64,
  /// kg P eq.
  pub eutrophication_freshwater:     f64,
  /// kg N eq.
  pub eutrophication_marine:         f64,
  /// kg CFC-11 eq.
  pub ozone_depletion:               f64,
  /// kg NMVOC eq.
  pub photochemical_ozone_formation: f64,
  /// disease incidence.
  pub particulate_matter:            f64,
}

impl AddAssign<&MidpointIndicators> for MidpointIndicators {
  fn add_assign(&mut self, rhs: &MidpointIndicators) {
    self.acidification += rhs.acidification;
    self.eutrophication_freshwater += rhs.eutrophication_freshwater;
    self.eutrophication_marine += rhs.eutrophication_marine;
    self.ozone_depletion += rhs.ozone_depletion;
    self.photochemical_ozone_formation += rhs.photochemical_ozone_formation;
    self.particulate_matter += rhs.particulate_matter;
  }
}

/// All impact values recorded against a row, already scaled to its quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialImpacts {
  pub climate:   ClimateImpact,
  /// Transport share of `climate.total`. Informational only: it is already
  /// embedded in the climate total.
  pub transport: f64,
  /// m³ water consumed.
  pub water:     f64,
  /// m²a crop-equivalent.
  pub land:      f64,
  /// kg waste generated.
  pub waste:     f64,
  pub midpoints: MidpointIndicators,
}

/// Raw greenhouse gas masses behind a row's climate figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasInventory {
  pub methane_fossil_kg:   f64,
  pub methane_biogenic_kg: f64,
  pub nitrous_oxide_kg:    f64,
  /// HFCs and PFCs, already expressed in kg CO2e.
  pub hfc_pfc_co2e:        f64,
}

impl AddAssign<&GasInventory> for GasInventory {
  fn add_assign(&mut self, rhs: &GasInventory) {
    self.methane_fossil_kg += rhs.methane_fossil_kg;
    self.methane_biogenic_kg += rhs.methane_biogenic_kg;
    self.nitrous_oxide_kg += rhs.nitrous_oxide_kg;
    self.hfc_pfc_co2e += rhs.hfc_pfc_co2e;
  }
}

// ─── Quality ─────────────────────────────────────────────────────────────────

/// Categorical data quality grade assigned by the emission-factor resolver.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum DataQualityGrade {
  High,
  Medium,
  Low,
}

impl DataQualityGrade {
  pub fn parse(raw: &str) -> Result<Self> {
    raw.trim().parse().map_err(|_| Error::UnknownGrade(raw.to_owned()))
  }
}

// ─── Row ─────────────────────────────────────────────────────────────────────

/// One line item on a product footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialImpactRow {
  #[serde(default = "Uuid::new_v4")]
  pub material_id:        Uuid,
  pub name:               String,
  /// Loosely-typed kind as stored upstream; resolved by the engine.
  #[serde(default)]
  pub material_type:      Option<String>,
  /// e.g. `aluminium`, `glass`, `paper`. Only meaningful for packaging.
  #[serde(default)]
  pub packaging_category: Option<String>,
  pub quantity:           f64,
  pub unit:               QuantityUnit,
  #[serde(default)]
  pub impacts:            MaterialImpacts,
  #[serde(default)]
  pub gases:              GasInventory,
  /// 0–100.
  #[serde(default)]
  pub confidence_score:   Option<f64>,
  #[serde(default)]
  pub data_quality_grade: Option<DataQualityGrade>,
  /// Where the impact values came from (e.g. `"ecoinvent 3.10"`, `"supplier"`).
  #[serde(default)]
  pub impact_source:      Option<String>,
}

impl MaterialImpactRow {
  /// Convenience constructor with every impact and quality field zeroed.
  pub fn new(name: impl Into<String>, quantity: f64, unit: QuantityUnit) -> Self {
    Self {
      material_id: Uuid::new_v4(),
      name: name.into(),
      material_type: None,
      packaging_category: None,
      quantity,
      unit,
      impacts: MaterialImpacts::default(),
      gases: GasInventory::default(),
      confidence_score: None,
      data_quality_grade: None,
      impact_source: None,
    }
  }
}
