//! Repository traits consumed by the aggregation engine.
//!
//! They are implemented by storage backends (e.g. `cradle-store-sqlite`).
//! The engine and the HTTP layer depend on these abstractions, not on any
//! concrete backend. Both traits are read-only; how rows are written is the
//! backend's business.

use std::future::Future;

use uuid::Uuid;

use crate::{
  facility::FacilityEmissionsAllocation,
  material::MaterialImpactRow,
  pcf::{PcfRecord, ProductMetadata},
};

/// Read access to material rows and the PCF they belong to.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait MaterialRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All material rows recorded against `pcf_id`, in entry order. An unknown
  /// PCF yields an empty list.
  fn get_materials(
    &self,
    pcf_id: Uuid,
  ) -> impl Future<Output = Result<Vec<MaterialImpactRow>, Self::Error>> + Send + '_;

  /// The PCF record. Returns `None` if not found.
  fn get_pcf(
    &self,
    pcf_id: Uuid,
  ) -> impl Future<Output = Result<Option<PcfRecord>, Self::Error>> + Send + '_;

  /// Unit-size metadata of the product behind `pcf_id`. Returns `None` if
  /// the PCF does not exist.
  fn get_product(
    &self,
    pcf_id: Uuid,
  ) -> impl Future<Output = Result<Option<ProductMetadata>, Self::Error>> + Send + '_;
}

/// Read access to facility emission allocations.
pub trait FacilityEmissionsRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every facility allocation recorded against `pcf_id`.
  fn get_facility_allocations(
    &self,
    pcf_id: Uuid,
  ) -> impl Future<Output = Result<Vec<FacilityEmissionsAllocation>, Self::Error>>
  + Send
  + '_;
}
