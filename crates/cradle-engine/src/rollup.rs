//! Corporate Scope 3 roll-up across a product portfolio.
//!
//! Only `by_scope.scope3` is multiplied out. Scope 1 and 2 of owned
//! facilities are already in the organisation's own inventory, and adding the
//! per-product figures back would count them twice.

use cradle_core::result::AggregationResult;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CorporateRollup {
  /// kg CO2e.
  pub scope3_total:      f64,
  pub products_included: usize,
  /// Failed aggregations, left out of the total.
  pub products_skipped:  usize,
}

/// Sum `scope3 × annual_volume` over `(result, annual_volume)` pairs.
pub fn corporate_scope3<'a, I>(products: I) -> CorporateRollup
where
  I: IntoIterator<Item = (&'a AggregationResult, f64)>,
{
  let mut rollup = CorporateRollup::default();
  for (result, annual_volume) in products {
    match result.scope3() {
      Some(scope3) => {
        rollup.scope3_total += scope3 * annual_volume;
        rollup.products_included += 1;
      }
      None => rollup.products_skipped += 1,
    }
  }
  rollup
}
