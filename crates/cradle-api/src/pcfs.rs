//! Handlers for `/pcfs` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/pcfs/{id}` | Record plus product unit size; 404 if not found |
//! | `GET`  | `/pcfs/{id}/materials` | Rows in entry order; 404 if the PCF is unknown |
//! | `GET`  | `/pcfs/{id}/facilities` | Facility allocations; 404 if the PCF is unknown |
//! | `POST` | `/pcfs/{id}/aggregate` | Body: [`AggregateBody`]; always 200 unless the repository fails |

use axum::{
  Json,
  extract::{Path, State},
};
use cradle_core::{
  boundary::SystemBoundary,
  config::{EndOfLifeConfig, UsePhaseConfig},
  facility::FacilityEmissionsAllocation,
  material::MaterialImpactRow,
  pcf::{PcfRecord, ProductMetadata},
  repository::{FacilityEmissionsRepository, MaterialRepository},
  result::AggregationResult,
};
use cradle_engine::AggregationRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

async fn require_pcf<S>(store: &S, id: Uuid) -> Result<PcfRecord, ApiError>
where
  S: MaterialRepository,
{
  store
    .get_pcf(id)
    .await
    .map_err(ApiError::repository)?
    .ok_or_else(|| ApiError::NotFound(format!("PCF {id} not found")))
}

// ─── Reads ───────────────────────────────────────────────────────────────────

/// A PCF record with its product's unit size.
#[derive(Debug, Serialize)]
pub struct PcfView {
  #[serde(flatten)]
  pub pcf:     PcfRecord,
  pub product: Option<ProductMetadata>,
}

/// `GET /pcfs/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PcfView>, ApiError>
where
  S: MaterialRepository + FacilityEmissionsRepository,
{
  let pcf = require_pcf(state.store.as_ref(), id).await?;
  let product = state
    .store
    .get_product(id)
    .await
    .map_err(ApiError::repository)?;
  Ok(Json(PcfView { pcf, product }))
}

/// `GET /pcfs/{id}/materials`
pub async fn materials<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<MaterialImpactRow>>, ApiError>
where
  S: MaterialRepository + FacilityEmissionsRepository,
{
  require_pcf(state.store.as_ref(), id).await?;
  let rows = state
    .store
    .get_materials(id)
    .await
    .map_err(ApiError::repository)?;
  Ok(Json(rows))
}

/// `GET /pcfs/{id}/facilities`
pub async fn facilities<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<FacilityEmissionsAllocation>>, ApiError>
where
  S: MaterialRepository + FacilityEmissionsRepository,
{
  require_pcf(state.store.as_ref(), id).await?;
  let allocations = state
    .store
    .get_facility_allocations(id)
    .await
    .map_err(ApiError::repository)?;
  Ok(Json(allocations))
}

// ─── Aggregate ───────────────────────────────────────────────────────────────

/// Body of `POST /pcfs/{id}/aggregate`. Every field is optional; `{}` runs
/// the PCF's declared boundary with stored facility allocations.
#[derive(Debug, Default, Deserialize)]
pub struct AggregateBody {
  /// Unrecognised values are treated as `cradle-to-gate`. Omitted uses the
  /// PCF's declared boundary.
  #[serde(default, alias = "systemBoundary")]
  pub system_boundary:      Option<String>,
  #[serde(default, alias = "usePhaseConfig")]
  pub use_phase_config:     Option<UsePhaseConfig>,
  #[serde(default, alias = "eolConfig")]
  pub eol_config:           Option<EndOfLifeConfig>,
  /// Omitted reads the allocations stored against the PCF.
  #[serde(default, alias = "facilityAllocations")]
  pub facility_allocations: Option<Vec<FacilityEmissionsAllocation>>,
}

/// `POST /pcfs/{id}/aggregate`
pub async fn aggregate<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AggregateBody>,
) -> Result<Json<AggregationResult>, ApiError>
where
  S: MaterialRepository + FacilityEmissionsRepository,
{
  let facility_allocations = match body.facility_allocations {
    Some(allocations) => allocations,
    None => state
      .store
      .get_facility_allocations(id)
      .await
      .map_err(ApiError::repository)?,
  };

  let request = AggregationRequest {
    pcf_id: id,
    system_boundary: body
      .system_boundary
      .as_deref()
      .map(SystemBoundary::parse_or_default),
    facility_allocations,
    use_phase_config: body.use_phase_config,
    eol_config: body.eol_config,
  };

  let result = state.aggregator.run(state.store.as_ref(), &request).await;
  Ok(Json(result))
}
