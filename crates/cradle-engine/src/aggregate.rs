//! The aggregation pipeline and result assembly.

use chrono::{DateTime, Utc};
use cradle_core::{
  boundary::SystemBoundary,
  config::{EndOfLifeConfig, UsePhaseConfig},
  facility::FacilityEmissionsAllocation,
  material::MaterialImpactRow,
  pcf::{PcfRecord, ProductMetadata},
  repository::MaterialRepository,
  result::{
    AggregationResult, ImpactBreakdown, LifecycleStageBreakdown, ProductImpacts,
    ScopeBreakdown,
  },
};
use uuid::Uuid;

use crate::{
  CALCULATION_VERSION, Error, Result, end_of_life, facility, gate, ghg,
  methodology::Methodology, normalize::normalize, quality, summation, use_phase,
  warning::Warning,
};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// What the caller asks for. Material data comes from the repository.
#[derive(Debug, Clone, Default)]
pub struct AggregationRequest {
  pub pcf_id:               Uuid,
  /// `None` uses the boundary declared on the PCF record.
  pub system_boundary:      Option<SystemBoundary>,
  pub facility_allocations: Vec<FacilityEmissionsAllocation>,
  pub use_phase_config:     Option<UsePhaseConfig>,
  pub eol_config:           Option<EndOfLifeConfig>,
}

/// Everything fetched from the repository for one aggregation.
#[derive(Debug, Clone)]
pub struct FetchedInputs {
  pub materials: Vec<MaterialImpactRow>,
  pub pcf:       PcfRecord,
  pub product:   Option<ProductMetadata>,
}

// ─── Aggregator ──────────────────────────────────────────────────────────────

/// Runs aggregations against a fixed [`Methodology`].
///
/// Holds no per-call state; one instance can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
  methodology: Methodology,
}

impl Aggregator {
  pub fn new(methodology: Methodology) -> Self { Self { methodology } }

  /// Fetch inputs and aggregate, reporting failures in-band.
  ///
  /// Never returns a partial result: any fatal error yields a result with
  /// `success: false` and the error message. A failed result carries the
  /// requested boundary, else the PCF's declared one once the record has
  /// been read, else `cradle-to-gate`.
  pub async fn run<R>(&self, repository: &R, request: &AggregationRequest) -> AggregationResult
  where
    R: MaterialRepository,
  {
    let (boundary, outcome) = match fetch(repository, request.pcf_id).await {
      Ok(inputs) => (
        request
          .system_boundary
          .unwrap_or_else(|| inputs.pcf.boundary()),
        self.calculate(&inputs, request, Utc::now()),
      ),
      Err(e) => (request.system_boundary.unwrap_or_default(), Err(e)),
    };

    outcome.unwrap_or_else(|e| {
      if e.is_fetch_failure() {
        tracing::error!(pcf_id = %request.pcf_id, error = %e, "repository read failed");
      } else {
        tracing::warn!(pcf_id = %request.pcf_id, error = %e, "aggregation failed");
      }
      AggregationResult::failure(request.pcf_id, boundary, CALCULATION_VERSION, e.to_string())
    })
  }

  /// The synchronous pipeline over already-fetched inputs.
  ///
  /// Deterministic: identical inputs give identical numbers; only
  /// `calculated_at` comes from the caller.
  pub fn calculate(
    &self,
    inputs: &FetchedInputs,
    request: &AggregationRequest,
    calculated_at: DateTime<Utc>,
  ) -> Result<AggregationResult> {
    if inputs.materials.is_empty() {
      return Err(Error::NoMaterialsFound(request.pcf_id));
    }

    let boundary = request
      .system_boundary
      .unwrap_or_else(|| inputs.pcf.boundary());
    let m = &self.methodology;

    let materials = normalize(&inputs.materials);
    let totals = summation::sum_materials(&materials);

    let plan = gate::plan(
      boundary,
      request.use_phase_config.as_ref(),
      request.eol_config.as_ref(),
    );
    let mut warnings = plan.warnings;

    let use_phase = match plan.use_phase {
      Some(config) => {
        match inputs.product.as_ref().and_then(ProductMetadata::volume_litres) {
          Some(litres) => {
            use_phase::calculate(litres, config, &m.use_phase, &m.grid).total()
          }
          None => {
            warnings.push(Warning::UnknownProductVolume);
            0.0
          }
        }
      }
      None => 0.0,
    };

    let end_of_life = match plan.end_of_life {
      Some(config) => {
        let eol = end_of_life::calculate(&materials, config, &m.end_of_life);
        warnings.extend(eol.warnings);
        eol.total
      }
      None => 0.0,
    };

    let facilities = facility::allocate(&request.facility_allocations);
    let data_quality = quality::score(&materials);
    let ghg_breakdown = ghg::build(&materials, &m.gwp);

    let total = totals.climate + facilities.processing + use_phase + end_of_life;

    for w in &warnings {
      tracing::warn!(pcf_id = %request.pcf_id, "{w}");
    }
    tracing::debug!(
      pcf_id = %request.pcf_id,
      %boundary,
      materials = materials.len(),
      total,
      "aggregated product impacts"
    );

    let by_lifecycle_stage = LifecycleStageBreakdown {
      raw_materials: totals.raw_materials,
      packaging:     totals.packaging,
      processing:    totals.processing + facilities.processing,
      use_phase,
      end_of_life,
    };

    let by_scope = ScopeBreakdown {
      scope1: facilities.scope1,
      scope2: facilities.scope2,
      scope3: totals.climate + facilities.scope3,
    };

    let impacts = ProductImpacts {
      climate_change_gwp100: total,
      water_consumption: totals.water,
      land_use: totals.land,
      waste_generation: totals.waste,
      midpoints: totals.midpoints,
      total_transport: totals.transport,
      breakdown: ImpactBreakdown {
        by_lifecycle_stage,
        by_scope,
        by_material: totals.by_material,
      },
      ghg_breakdown,
      data_quality,
    };

    Ok(AggregationResult {
      success: true,
      pcf_id: request.pcf_id,
      organization_id: Some(inputs.pcf.organization_id),
      system_boundary: boundary,
      total_carbon_footprint: total,
      materials_count: inputs.materials.len(),
      production_sites_count: request.facility_allocations.len(),
      calculated_at,
      calculation_version: CALCULATION_VERSION.to_owned(),
      warnings: warnings.iter().map(ToString::to_string).collect(),
      error: None,
      impacts: Some(impacts),
    })
  }
}

/// Issue the three independent reads concurrently.
async fn fetch<R>(repository: &R, pcf_id: Uuid) -> Result<FetchedInputs>
where
  R: MaterialRepository,
{
  let (materials, pcf, product) = tokio::try_join!(
    async {
      repository
        .get_materials(pcf_id)
        .await
        .map_err(|e| Error::MaterialsFetchFailed(Box::new(e)))
    },
    async {
      repository
        .get_pcf(pcf_id)
        .await
        .map_err(|e| Error::PcfFetchFailed(Box::new(e)))
    },
    async {
      repository
        .get_product(pcf_id)
        .await
        .map_err(|e| Error::ProductFetchFailed(Box::new(e)))
    },
  )?;

  let pcf = pcf.ok_or(Error::PcfNotFound(pcf_id))?;
  Ok(FetchedInputs { materials, pcf, product })
}

/// Aggregate one PCF with the default [`Methodology`].
///
/// Failures are reported in-band; see [`Aggregator::run`].
pub async fn aggregate_product_impacts<R>(
  repository: &R,
  pcf_id: Uuid,
  facility_allocations: Vec<FacilityEmissionsAllocation>,
  system_boundary: SystemBoundary,
  use_phase_config: Option<UsePhaseConfig>,
  eol_config: Option<EndOfLifeConfig>,
) -> AggregationResult
where
  R: MaterialRepository,
{
  let request = AggregationRequest {
    pcf_id,
    system_boundary: Some(system_boundary),
    facility_allocations,
    use_phase_config,
    eol_config,
  };
  Aggregator::default().run(repository, &request).await
}
