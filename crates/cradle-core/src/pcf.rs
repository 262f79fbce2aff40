//! Product Carbon Footprint (PCF) records and product metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::boundary::SystemBoundary;

/// The envelope a set of material rows hangs off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcfRecord {
  pub pcf_id:          Uuid,
  pub organization_id: Uuid,
  pub product_name:    Option<String>,
  /// The boundary declared on the record, as stored.
  pub system_boundary: String,
  pub created_at:      DateTime<Utc>,
}

impl PcfRecord {
  /// The declared boundary; unrecognised values read as `cradle-to-gate`.
  pub fn boundary(&self) -> SystemBoundary {
    SystemBoundary::parse_or_default(&self.system_boundary)
  }
}

/// Sales-unit size of the product a PCF describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
  #[serde(default)]
  pub unit_size_value: Option<f64>,
  /// `ml`, `cl`, `L`, `g` or `kg`.
  #[serde(default)]
  pub unit_size_unit:  Option<String>,
}

impl ProductMetadata {
  /// The unit size in litres, with solids taken at 1 kg/L.
  ///
  /// Returns `None` when either field is missing or the unit is not
  /// recognised.
  pub fn volume_litres(&self) -> Option<f64> {
    let value = self.unit_size_value?;
    let unit = self.unit_size_unit.as_deref()?.trim().to_ascii_lowercase();
    let litres = match unit.as_str() {
      "ml" => value / 1000.0,
      "cl" => value / 100.0,
      "l" | "litre" | "litres" | "liter" | "liters" => value,
      "g" => value / 1000.0,
      "kg" => value,
      _ => return None,
    };
    Some(litres)
  }
}

/// Input to a repository's PCF creation. `pcf_id` and `created_at` are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPcf {
  pub organization_id: Uuid,
  #[serde(default)]
  pub product_name:    Option<String>,
  #[serde(default)]
  pub system_boundary: SystemBoundary,
  #[serde(default)]
  pub product:         ProductMetadata,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn product(value: f64, unit: &str) -> ProductMetadata {
    ProductMetadata {
      unit_size_value: Some(value),
      unit_size_unit:  Some(unit.to_owned()),
    }
  }

  #[test]
  fn volume_conversions() {
    assert_eq!(product(330.0, "ml").volume_litres(), Some(0.33));
    assert_eq!(product(75.0, "cl").volume_litres(), Some(0.75));
    assert_eq!(product(1.5, "L").volume_litres(), Some(1.5));
    assert_eq!(product(500.0, "g").volume_litres(), Some(0.5));
  }

  #[test]
  fn unknown_or_missing_unit_has_no_volume() {
    assert_eq!(product(6.0, "pack").volume_litres(), None);
    assert_eq!(ProductMetadata::default().volume_litres(), None);
  }
}
