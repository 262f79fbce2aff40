//! Data quality index: impact-weighted confidence across material rows.

use cradle_core::result::{DataQuality, DataQualityRating};

use crate::normalize::NormalizedMaterial;

/// Confidence assumed for a row without a score. Falls in the "Poor" band.
pub const DEFAULT_CONFIDENCE: f64 = 40.0;

/// Score `materials` as `Σ(|climate| × confidence) / Σ|climate|`.
///
/// Rows with zero climate carry no weight and are skipped. With no weighted
/// rows at all the score is [`DEFAULT_CONFIDENCE`].
pub fn score(materials: &[NormalizedMaterial<'_>]) -> DataQuality {
  let mut weighted_sum = 0.0;
  let mut weight_total = 0.0;
  let mut weighted_materials = 0;
  let mut defaulted_materials = 0;

  for m in materials {
    let weight = m.row.impacts.climate.total.abs();
    if weight == 0.0 || !weight.is_finite() {
      continue;
    }
    let confidence = match m.row.confidence_score {
      Some(c) => c.clamp(0.0, 100.0),
      None => {
        defaulted_materials += 1;
        DEFAULT_CONFIDENCE
      }
    };
    weighted_sum += weight * confidence;
    weight_total += weight;
    weighted_materials += 1;
  }

  let score = if weight_total > 0.0 {
    weighted_sum / weight_total
  } else {
    DEFAULT_CONFIDENCE
  };

  DataQuality {
    score,
    rating: DataQualityRating::from_score(score),
    weighted_materials,
    defaulted_materials,
  }
}
