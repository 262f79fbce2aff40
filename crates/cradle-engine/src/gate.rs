//! System boundary gate: which downstream stages run for a boundary tier.

use cradle_core::{
  boundary::SystemBoundary,
  config::{EndOfLifeConfig, UsePhaseConfig},
};

use crate::warning::Warning;

/// The downstream stages to compute, with the configuration each will use.
#[derive(Debug)]
pub struct StagePlan<'a> {
  pub use_phase:   Option<&'a UsePhaseConfig>,
  pub end_of_life: Option<&'a EndOfLifeConfig>,
  pub warnings:    Vec<Warning>,
}

/// Decide which stages run.
///
/// Configuration supplied for a stage outside the boundary is ignored. A
/// stage inside the boundary without configuration is skipped with a
/// warning naming the missing object.
pub fn plan<'a>(
  boundary: SystemBoundary,
  use_phase: Option<&'a UsePhaseConfig>,
  end_of_life: Option<&'a EndOfLifeConfig>,
) -> StagePlan<'a> {
  let mut warnings = Vec::new();

  let use_phase = if boundary.includes_use_phase() {
    if use_phase.is_none() {
      warnings.push(Warning::MissingUsePhaseConfig { boundary });
    }
    use_phase
  } else {
    None
  };

  let end_of_life = if boundary.includes_end_of_life() {
    if end_of_life.is_none() {
      warnings.push(Warning::MissingEolConfig { boundary });
    }
    end_of_life
  } else {
    None
  };

  StagePlan { use_phase, end_of_life, warnings }
}
