//! Material normalisation: resolve each raw row's kind and lifecycle stage
//! once, so the rest of the pipeline branches on [`MaterialKind`] only.

use cradle_core::material::{
  LifecycleStage, MaterialImpactRow, MaterialKind, has_process_marker,
};

/// A material row with its kind resolved.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedMaterial<'a> {
  pub row:   &'a MaterialImpactRow,
  pub kind:  MaterialKind,
  pub stage: LifecycleStage,
}

/// Resolve the kind of a single row.
///
/// The process-addition marker on the name wins over whatever kind was
/// stored; otherwise the stored kind is used, and anything missing or
/// unrecognised is an ingredient.
pub fn resolve_kind(row: &MaterialImpactRow) -> MaterialKind {
  if has_process_marker(&row.name) {
    return MaterialKind::ProcessAddition;
  }
  row
    .material_type
    .as_deref()
    .and_then(MaterialKind::from_stored)
    .unwrap_or_default()
}

/// Classify every row, preserving input order.
pub fn normalize(rows: &[MaterialImpactRow]) -> Vec<NormalizedMaterial<'_>> {
  rows
    .iter()
    .map(|row| {
      let kind = resolve_kind(row);
      NormalizedMaterial { row, kind, stage: kind.lifecycle_stage() }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use cradle_core::material::QuantityUnit;

  use super::*;

  fn row(name: &str, material_type: Option<&str>) -> MaterialImpactRow {
    let mut r = MaterialImpactRow::new(name, 1.0, QuantityUnit::Kg);
    r.material_type = material_type.map(str::to_owned);
    r
  }

  #[test]
  fn stored_kind_is_used() {
    let rows = [
      row("Barley malt", Some("ingredient")),
      row("Aluminium can", Some("packaging")),
    ];
    let out = normalize(&rows);
    assert_eq!(out[0].kind, MaterialKind::Ingredient);
    assert_eq!(out[0].stage, LifecycleStage::RawMaterials);
    assert_eq!(out[1].kind, MaterialKind::Packaging);
    assert_eq!(out[1].stage, LifecycleStage::Packaging);
  }

  #[test]
  fn marker_overrides_stored_kind() {
    let r = row("[Maturation] Oak cask", Some("packaging"));
    assert_eq!(resolve_kind(&r), MaterialKind::ProcessAddition);
    assert_eq!(
      resolve_kind(&r).lifecycle_stage(),
      LifecycleStage::Processing
    );
  }

  #[test]
  fn missing_or_unknown_kind_defaults_to_ingredient() {
    assert_eq!(resolve_kind(&row("Water", None)), MaterialKind::Ingredient);
    assert_eq!(
      resolve_kind(&row("Yeast", Some("consumable"))),
      MaterialKind::Ingredient
    );
  }
}
