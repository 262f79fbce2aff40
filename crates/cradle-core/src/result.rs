//! The aggregation result: the read model handed to report renderers and
//! corporate roll-up jobs.
//!
//! Never stored by the engine, always derived.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  boundary::SystemBoundary,
  material::{
    DataQualityGrade, GasInventory, LifecycleStage, MaterialKind,
    MidpointIndicators, QuantityUnit,
  },
};

// ─── Breakdown ───────────────────────────────────────────────────────────────

/// kg CO2e per lifecycle stage.
///
/// `raw_materials`, `packaging` and the material share of `processing`
/// include transport, so this breakdown does not sum to the headline total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleStageBreakdown {
  pub raw_materials: f64,
  pub packaging:     f64,
  pub processing:    f64,
  pub use_phase:     f64,
  /// Negative when recycling credits outweigh disposal emissions.
  pub end_of_life:   f64,
}

/// kg CO2e per GHG Protocol scope, from the reporting organisation's view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeBreakdown {
  pub scope1: f64,
  pub scope2: f64,
  pub scope3: f64,
}

/// One row of the hotspot table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialContribution {
  pub material_id:        Uuid,
  pub name:               String,
  pub quantity:           f64,
  pub unit:               QuantityUnit,
  /// The row's climate total; transport is not added again.
  pub climate:            f64,
  pub source:             Option<String>,
  pub kind:               MaterialKind,
  pub lifecycle_stage:    LifecycleStage,
  pub data_quality_grade: Option<DataQualityGrade>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactBreakdown {
  pub by_lifecycle_stage: LifecycleStageBreakdown,
  pub by_scope:           ScopeBreakdown,
  /// Sorted by `climate`, largest first.
  pub by_material:        Vec<MaterialContribution>,
}

// ─── GHG ─────────────────────────────────────────────────────────────────────

/// kg CO2e split by carbon origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarbonOrigin {
  pub fossil:          f64,
  pub biogenic:        f64,
  pub land_use_change: f64,
}

/// Global-warming potentials used to express non-CO2 gases in CO2e.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GwpFactors {
  /// Methodology tag, e.g. `"IPCC AR6"`.
  pub method:        String,
  pub methane:       f64,
  pub nitrous_oxide: f64,
}

impl Default for GwpFactors {
  /// IPCC AR6 GWP-100 values.
  fn default() -> Self {
    Self {
      method:        "IPCC AR6".to_owned(),
      methane:       27.9,
      nitrous_oxide: 273.0,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GhgBreakdown {
  pub carbon_origin: CarbonOrigin,
  pub gas_inventory: GasInventory,
  /// `gas_inventory` converted with `gwp_factors`, in kg CO2e.
  pub methane_co2e:  f64,
  pub n2o_co2e:      f64,
  pub gwp_factors:   GwpFactors,
}

// ─── Data quality ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataQualityRating {
  Good,
  Fair,
  Poor,
}

impl DataQualityRating {
  /// `>= 80` is Good, `>= 50` Fair, anything lower Poor.
  pub fn from_score(score: f64) -> Self {
    if score >= 80.0 {
      Self::Good
    } else if score >= 50.0 {
      Self::Fair
    } else {
      Self::Poor
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
  /// Impact-weighted confidence, 0–100.
  pub score:               f64,
  pub rating:              DataQualityRating,
  /// Rows that carried weight in the score (non-zero climate).
  pub weighted_materials:  usize,
  /// Weighted rows that had no confidence score and used the default.
  pub defaulted_materials: usize,
}

// ─── Impacts ─────────────────────────────────────────────────────────────────

/// The multi-capital impact summary of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImpacts {
  /// kg CO2e; equal to the headline `total_carbon_footprint`.
  pub climate_change_gwp100: f64,
  pub water_consumption:     f64,
  pub land_use:              f64,
  pub waste_generation:      f64,
  pub midpoints:             MidpointIndicators,
  /// Informational: already contained in the material climate totals.
  pub total_transport:       f64,
  pub breakdown:             ImpactBreakdown,
  pub ghg_breakdown:         GhgBreakdown,
  pub data_quality:          DataQuality,
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// Outcome of one aggregation. Domain failures are reported in-band with
/// `success: false` and an `error` message rather than as a Rust error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult {
  pub success:                bool,
  pub pcf_id:                 Uuid,
  pub organization_id:        Option<Uuid>,
  /// The boundary applied. On a failure, the requested boundary, else the
  /// PCF's declared one if it was read, else `cradle-to-gate`.
  pub system_boundary:        SystemBoundary,
  /// kg CO2e per sales unit.
  pub total_carbon_footprint: f64,
  pub materials_count:        usize,
  pub production_sites_count: usize,
  pub calculated_at:          DateTime<Utc>,
  pub calculation_version:    String,
  pub warnings:               Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error:                  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub impacts:                Option<ProductImpacts>,
}

impl AggregationResult {
  /// A failed aggregation carrying only the error message.
  pub fn failure(
    pcf_id: Uuid,
    system_boundary: SystemBoundary,
    calculation_version: impl Into<String>,
    error: impl Into<String>,
  ) -> Self {
    Self {
      success: false,
      pcf_id,
      organization_id: None,
      system_boundary,
      total_carbon_footprint: 0.0,
      materials_count: 0,
      production_sites_count: 0,
      calculated_at: Utc::now(),
      calculation_version: calculation_version.into(),
      warnings: Vec::new(),
      error: Some(error.into()),
      impacts: None,
    }
  }

  /// `by_scope.scope3`, or `None` for a failed result.
  pub fn scope3(&self) -> Option<f64> {
    self
      .impacts
      .as_ref()
      .filter(|_| self.success)
      .map(|i| i.breakdown.by_scope.scope3)
  }
}
