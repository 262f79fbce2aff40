//! Bulk import of PCFs, material rows and facility allocations from JSON.
//!
//! ```json
//! { "pcfs": [ {
//!     "pcf_id": "…",                      // optional; generated if omitted
//!     "organization_id": "…",
//!     "product_name": "Pale ale 330ml",
//!     "system_boundary": "cradle-to-grave",
//!     "product": { "unit_size_value": 330, "unit_size_unit": "ml" },
//!     "materials": [ { "name": "Barley malt", "quantity": 0.12, "unit": "kg", … } ],
//!     "facility_allocations": [ … ]
//! } ] }
//! ```
//!
//! Each PCF is written in its own transaction. A failing PCF leaves nothing
//! behind, though PCFs earlier in the document stay imported.

use cradle_core::{
  facility::FacilityEmissionsAllocation, material::MaterialImpactRow, pcf::NewPcf,
};
use cradle_store_sqlite::SqliteStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ImportDocument {
  pub pcfs: Vec<PcfImport>,
}

/// One PCF and everything recorded against it.
#[derive(Debug, Deserialize)]
pub struct PcfImport {
  #[serde(default)]
  pub pcf_id:               Option<Uuid>,
  #[serde(flatten)]
  pub pcf:                  NewPcf,
  #[serde(default)]
  pub materials:            Vec<MaterialImpactRow>,
  #[serde(default)]
  pub facility_allocations: Vec<FacilityEmissionsAllocation>,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
  pub pcf_ids:              Vec<Uuid>,
  pub materials:            usize,
  pub facility_allocations: usize,
}

/// Write every PCF in `document` to `store`.
pub async fn import(
  store: &SqliteStore,
  document: ImportDocument,
) -> cradle_store_sqlite::Result<ImportSummary> {
  let mut summary = ImportSummary::default();

  for entry in document.pcfs {
    let pcf_id = entry.pcf_id.unwrap_or_else(Uuid::new_v4);
    store
      .import_pcf(
        pcf_id,
        entry.pcf,
        &entry.materials,
        &entry.facility_allocations,
      )
      .await?;

    tracing::info!(
      %pcf_id,
      materials = entry.materials.len(),
      facilities = entry.facility_allocations.len(),
      "imported PCF"
    );
    summary.pcf_ids.push(pcf_id);
    summary.materials += entry.materials.len();
    summary.facility_allocations += entry.facility_allocations.len();
  }

  Ok(summary)
}
