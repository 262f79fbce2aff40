//! Core impact summation over normalised material rows.
//!
//! The headline climate figure is the plain sum of each row's climate total.
//! Transport is already embedded in that total and is accumulated separately
//! for display only. The per-stage buckets, on the other hand, are
//! `climate + transport` per row: they decompose the footprint for display and
//! intentionally do not reconcile with the headline number.

use cradle_core::{
  material::{MaterialKind, MidpointIndicators},
  result::MaterialContribution,
};

use crate::normalize::NormalizedMaterial;

/// Everything the pipeline derives from material rows alone.
#[derive(Debug, Clone, Default)]
pub struct MaterialTotals {
  /// Σ climate total. Never includes transport a second time.
  pub climate:       f64,
  pub transport:     f64,
  pub water:         f64,
  pub land:          f64,
  pub waste:         f64,
  pub midpoints:     MidpointIndicators,
  /// Σ (climate + transport) of ingredient rows.
  pub raw_materials: f64,
  /// Σ (climate + transport) of packaging rows.
  pub packaging:     f64,
  /// Σ (climate + transport) of process-addition rows.
  pub processing:    f64,
  /// Hotspot table, largest climate contribution first.
  pub by_material:   Vec<MaterialContribution>,
}

/// Sum impacts across `materials`.
pub fn sum_materials(materials: &[NormalizedMaterial<'_>]) -> MaterialTotals {
  let mut totals = MaterialTotals::default();

  for m in materials {
    let impacts = &m.row.impacts;
    let climate = impacts.climate.total;

    totals.climate += climate;
    totals.transport += impacts.transport;
    totals.water += impacts.water;
    totals.land += impacts.land;
    totals.waste += impacts.waste;
    totals.midpoints += &impacts.midpoints;

    let staged = climate + impacts.transport;
    match m.kind {
      MaterialKind::Ingredient => totals.raw_materials += staged,
      MaterialKind::Packaging => totals.packaging += staged,
      MaterialKind::ProcessAddition => totals.processing += staged,
    }

    totals.by_material.push(contribution(m));
  }

  // `sort_by` is stable: equal contributions keep their entry order.
  totals
    .by_material
    .sort_by(|a, b| b.climate.total_cmp(&a.climate));

  totals
}

fn contribution(m: &NormalizedMaterial<'_>) -> MaterialContribution {
  MaterialContribution {
    material_id:        m.row.material_id,
    name:               m.row.name.clone(),
    quantity:           m.row.quantity,
    unit:               m.row.unit,
    climate:            m.row.impacts.climate.total,
    source:             m.row.impact_source.clone(),
    kind:               m.kind,
    lifecycle_stage:    m.stage,
    data_quality_grade: m.row.data_quality_grade,
  }
}

#[cfg(test)]
mod tests {
  use cradle_core::material::{MaterialImpactRow, QuantityUnit};

  use super::*;
  use crate::normalize::normalize;

  fn row(name: &str, kind: &str, climate: f64, transport: f64) -> MaterialImpactRow {
    let mut r = MaterialImpactRow::new(name, 1.0, QuantityUnit::Kg);
    r.material_type = Some(kind.to_owned());
    r.impacts.climate.total = climate;
    r.impacts.transport = transport;
    r
  }

  #[test]
  fn headline_total_never_re_adds_transport() {
    let rows = [
      row("Malt", "ingredient", 0.30, 0.05),
      row("Can", "packaging", 0.12, 0.02),
    ];
    let totals = sum_materials(&normalize(&rows));
    assert_eq!(totals.climate, 0.30 + 0.12);
    assert_eq!(totals.transport, 0.05 + 0.02);
  }

  #[test]
  fn stage_buckets_include_transport() {
    let rows = [
      row("Malt", "ingredient", 0.30, 0.05),
      row("Can", "packaging", 0.12, 0.02),
      row("[Maturation] Tank", "ingredient", 0.04, 0.0),
    ];
    let totals = sum_materials(&normalize(&rows));
    assert_eq!(totals.raw_materials, 0.30 + 0.05);
    assert_eq!(totals.packaging, 0.12 + 0.02);
    assert_eq!(totals.processing, 0.04);
  }

  #[test]
  fn hotspots_sorted_descending_with_stable_ties() {
    let rows = [
      row("Sugar", "ingredient", 0.10, 0.0),
      row("Bottle", "packaging", 0.50, 0.0),
      row("Label", "packaging", 0.10, 0.0),
    ];
    let totals = sum_materials(&normalize(&rows));
    let names: Vec<_> = totals.by_material.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Bottle", "Sugar", "Label"]);
  }

  #[test]
  fn secondary_categories_are_summed() {
    let mut a = row("Malt", "ingredient", 0.3, 0.0);
    a.impacts.water = 0.002;
    a.impacts.midpoints.acidification = 0.001;
    let mut b = row("Hops", "ingredient", 0.1, 0.0);
    b.impacts.water = 0.001;
    b.impacts.land = 0.4;
    b.impacts.midpoints.acidification = 0.002;

    let totals = sum_materials(&normalize(&[a, b]));
    assert!((totals.water - 0.003).abs() < 1e-12);
    assert_eq!(totals.land, 0.4);
    assert!((totals.midpoints.acidification - 0.003).abs() < 1e-12);
  }
}
