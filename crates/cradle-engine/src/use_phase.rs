//! Use-phase impact: refrigeration energy and carbonation losses.
//!
//! A deterministic function of the product volume, the caller's
//! [`UsePhaseConfig`] and a grid intensity lookup. No I/O.

use cradle_core::config::UsePhaseConfig;

use crate::methodology::{GridIntensity, UsePhaseFactors};

/// kg CO2e per sales unit attributable to the use phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsePhaseImpact {
  pub refrigeration: f64,
  pub carbonation:   f64,
}

impl UsePhaseImpact {
  pub fn total(&self) -> f64 { self.refrigeration + self.carbonation }
}

/// Compute the use-phase impact of one unit of `volume_litres`.
pub fn calculate(
  volume_litres: f64,
  config: &UsePhaseConfig,
  factors: &UsePhaseFactors,
  grid: &impl GridIntensity,
) -> UsePhaseImpact {
  let volume = volume_litres.max(0.0);

  let refrigeration = if config.needs_refrigeration {
    let days = config.refrigeration_days.max(0.0);
    let retail = config.retail_refrigeration_split.clamp(0.0, 1.0);
    let kwh_per_litre_day = retail * factors.retail_kwh_per_litre_day
      + (1.0 - retail) * factors.domestic_kwh_per_litre_day;
    volume
      * days
      * kwh_per_litre_day
      * grid.kg_co2e_per_kwh(&config.consumer_country_code)
  } else {
    0.0
  };

  let carbonation = if config.is_carbonated {
    let kind = config.carbonation_type.unwrap_or(factors.default_carbonation);
    volume * factors.carbonation.factor(kind)
  } else {
    0.0
  };

  UsePhaseImpact {
    refrigeration: refrigeration.max(0.0),
    carbonation:   carbonation.max(0.0),
  }
}
