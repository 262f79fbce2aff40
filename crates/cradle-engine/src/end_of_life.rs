//! End-of-life impact of packaging.
//!
//! Only rows resolved as [`MaterialKind::Packaging`] are disposed of.
//! Ingredients are consumed with the product and process additions are not
//! physical objects, so both are excluded whatever their packaging category.
//! Recycling contributes a negative avoided-burden credit, so the stage total
//! can be net negative.

use cradle_core::{config::EndOfLifeConfig, material::MaterialKind};

use crate::{methodology::EolFactorTable, normalize::NormalizedMaterial, warning::Warning};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndOfLifeImpact {
  /// Net kg CO2e per sales unit.
  pub total:            f64,
  /// Σ recycling credits (≤ 0).
  pub recycling_credit: f64,
  /// Σ disposal burdens of the remaining pathways (≥ 0 with default factors).
  pub disposal_burden:  f64,
  pub warnings:         Vec<Warning>,
}

/// Model the disposal of every packaging row in `materials`.
pub fn calculate(
  materials: &[NormalizedMaterial<'_>],
  config: &EndOfLifeConfig,
  factors: &EolFactorTable,
) -> EndOfLifeImpact {
  let mut impact = EndOfLifeImpact::default();

  for m in materials.iter().filter(|m| m.kind == MaterialKind::Packaging) {
    let Some(category) = m.row.packaging_category.as_deref() else {
      continue;
    };
    let Some(shares) = config.shares_for(category) else {
      continue;
    };
    let Some(mass) = m.row.unit.mass_kg(m.row.quantity) else {
      impact.warnings.push(Warning::UnweighablePackaging {
        name: m.row.name.clone(),
      });
      continue;
    };

    let row_factors = factors.for_category(category);
    for (pathway, share) in shares.iter() {
      let contribution = mass * share / 100.0 * row_factors.factor(pathway);
      if contribution < 0.0 {
        impact.recycling_credit += contribution;
      } else {
        impact.disposal_burden += contribution;
      }
    }
  }

  impact.total = impact.recycling_credit + impact.disposal_burden;
  impact
}

#[cfg(test)]
mod tests {
  use cradle_core::{
    config::PathwayShares,
    material::{MaterialImpactRow, QuantityUnit},
  };

  use super::*;
  use crate::normalize::normalize;

  fn packaging(name: &str, category: &str, grams: f64) -> MaterialImpactRow {
    let mut r = MaterialImpactRow::new(name, grams, QuantityUnit::G);
    r.material_type = Some("packaging".into());
    r.packaging_category = Some(category.into());
    r
  }

  fn config(category: &str, recycling: f64, landfill: f64) -> EndOfLifeConfig {
    let mut cfg = EndOfLifeConfig { region: "GB".into(), ..Default::default() };
    cfg.pathways.insert(category.into(), PathwayShares {
      recycling,
      landfill,
      ..Default::default()
    });
    cfg
  }

  #[test]
  fn high_recycling_aluminium_is_net_negative() {
    let rows = [packaging("Can body", "aluminium", 15.0)];
    let impact = calculate(
      &normalize(&rows),
      &config("aluminium", 75.0, 25.0),
      &EolFactorTable::default(),
    );
    assert!(impact.total < 0.0, "expected a net credit, got {}", impact.total);
    assert!(impact.recycling_credit < 0.0);
    assert!(impact.disposal_burden > 0.0);
  }

  #[test]
  fn mass_and_share_scale_linearly() {
    let table = EolFactorTable::default();
    let rows = [packaging("Bottle", "glass", 200.0)];
    let impact = calculate(&normalize(&rows), &config("glass", 0.0, 100.0), &table);
    let expected = 0.2 * table.for_category("glass").landfill;
    assert!((impact.total - expected).abs() < 1e-12);
  }

  #[test]
  fn category_without_pathways_contributes_nothing() {
    let rows = [packaging("Label", "paper", 2.0)];
    let impact = calculate(
      &normalize(&rows),
      &config("aluminium", 75.0, 25.0),
      &EolFactorTable::default(),
    );
    assert_eq!(impact.total, 0.0);
  }

  #[test]
  fn ingredients_and_process_additions_are_excluded() {
    let mut ingredient = packaging("Sugar", "paper", 50.0);
    ingredient.material_type = Some("ingredient".into());
    let process = packaging("[Maturation] Oak cask", "wood", 500.0);

    let mut cfg = config("paper", 0.0, 100.0);
    cfg.pathways.insert("wood".into(), PathwayShares {
      landfill: 100.0,
      ..Default::default()
    });

    let impact = calculate(
      &normalize(&[ingredient, process]),
      &cfg,
      &EolFactorTable::default(),
    );
    assert_eq!(impact.total, 0.0);
    assert!(impact.warnings.is_empty());
  }

  #[test]
  fn unit_counted_packaging_warns() {
    let mut crate_row = MaterialImpactRow::new("Crate", 1.0, QuantityUnit::Unit);
    crate_row.material_type = Some("packaging".into());
    crate_row.packaging_category = Some("plastic".into());

    let impact = calculate(
      &normalize(&[crate_row]),
      &config("plastic", 50.0, 50.0),
      &EolFactorTable::default(),
    );
    assert_eq!(impact.total, 0.0);
    assert_eq!(impact.warnings, vec![Warning::UnweighablePackaging {
      name: "Crate".into(),
    }]);
  }
}
