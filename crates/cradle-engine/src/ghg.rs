//! GHG inventory: carbon origin split and raw gas masses.

use cradle_core::{
  material::GasInventory,
  result::{CarbonOrigin, GhgBreakdown, GwpFactors},
};

use crate::normalize::NormalizedMaterial;

pub fn build(materials: &[NormalizedMaterial<'_>], gwp: &GwpFactors) -> GhgBreakdown {
  let mut carbon_origin = CarbonOrigin::default();
  let mut gas_inventory = GasInventory::default();

  for m in materials {
    let climate = &m.row.impacts.climate;
    carbon_origin.fossil += climate.fossil;
    carbon_origin.biogenic += climate.biogenic;
    carbon_origin.land_use_change += climate.land_use_change;
    gas_inventory += &m.row.gases;
  }

  let methane_kg = gas_inventory.methane_fossil_kg + gas_inventory.methane_biogenic_kg;

  GhgBreakdown {
    carbon_origin,
    gas_inventory,
    methane_co2e: methane_kg * gwp.methane,
    n2o_co2e: gas_inventory.nitrous_oxide_kg * gwp.nitrous_oxide,
    gwp_factors: gwp.clone(),
  }
}
