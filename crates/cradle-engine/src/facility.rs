//! Facility emissions allocation: facility totals to per-unit figures, routed
//! to GHG Protocol scopes.

use cradle_core::facility::FacilityEmissionsAllocation;

/// Smallest divisor applied to a facility's production volume.
///
/// A zero (or fractional) volume is floored to one unit instead of failing,
/// so the whole allocation lands on a single unit. The resulting per-unit
/// figure is deliberately left inflated; spotting it is the caller's job.
pub const VOLUME_FLOOR: f64 = 1.0;

/// Per-unit facility emissions, kg CO2e.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FacilityImpact {
  /// Σ allocated emissions per unit; reported under processing.
  pub processing: f64,
  pub scope1:     f64,
  pub scope2:     f64,
  pub scope3:     f64,
}

/// Allocate every facility's emissions to one unit of product.
///
/// Owned facilities report their own Scope 1 and 2 per unit. Everything from
/// a contract manufacturer is Scope 3 to the reporting organisation, whatever
/// the manufacturer's own split.
pub fn allocate(allocations: &[FacilityEmissionsAllocation]) -> FacilityImpact {
  let mut impact = FacilityImpact::default();

  for a in allocations {
    let divisor = a.product_volume.max(VOLUME_FLOOR);
    let per_unit = a.allocated_emissions / divisor;
    impact.processing += per_unit;

    if a.is_contract_manufacturer {
      impact.scope3 += per_unit;
    } else {
      impact.scope1 += a.scope1_emissions / divisor;
      impact.scope2 += a.scope2_emissions / divisor;
    }
  }

  impact
}
