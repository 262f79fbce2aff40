//! Facility emissions attributed to a product.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One production facility's contribution to one product, over an allocation
/// period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityEmissionsAllocation {
  pub facility_id:              Uuid,
  #[serde(default)]
  pub facility_name:            Option<String>,
  /// Total kg CO2e attributed to this product at this facility.
  pub allocated_emissions:      f64,
  #[serde(default)]
  pub scope1_emissions:         f64,
  #[serde(default)]
  pub scope2_emissions:         f64,
  /// Units of the product produced during the allocation period. Zero is
  /// tolerated; see the engine's divisor floor.
  pub product_volume:           f64,
  /// Production is outsourced; every emission here is value-chain (Scope 3)
  /// for the reporting organisation.
  #[serde(default)]
  pub is_contract_manufacturer: bool,
}
