//! Integration tests for `SqliteStore` against an in-memory database.

use cradle_core::{
  boundary::SystemBoundary,
  facility::FacilityEmissionsAllocation,
  material::{DataQualityGrade, MaterialImpactRow, QuantityUnit},
  pcf::{NewPcf, ProductMetadata},
  repository::{FacilityEmissionsRepository, MaterialRepository},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_pcf(boundary: SystemBoundary) -> NewPcf {
  NewPcf {
    organization_id: Uuid::new_v4(),
    product_name:    Some("Pale ale 330ml".into()),
    system_boundary: boundary,
    product:         ProductMetadata {
      unit_size_value: Some(330.0),
      unit_size_unit:  Some("ml".into()),
    },
  }
}

// ─── PCFs ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_pcf() {
  let s = store().await;
  let pcf = s.add_pcf(new_pcf(SystemBoundary::CradleToGrave)).await.unwrap();
  assert_eq!(pcf.system_boundary, "cradle-to-grave");

  let fetched = s.get_pcf(pcf.pcf_id).await.unwrap().unwrap();
  assert_eq!(fetched.pcf_id, pcf.pcf_id);
  assert_eq!(fetched.organization_id, pcf.organization_id);
  assert_eq!(fetched.boundary(), SystemBoundary::CradleToGrave);
  assert_eq!(fetched.product_name.as_deref(), Some("Pale ale 330ml"));
}

#[tokio::test]
async fn product_metadata_round_trips_to_volume() {
  let s = store().await;
  let pcf = s.add_pcf(new_pcf(SystemBoundary::CradleToGate)).await.unwrap();

  let product = s.get_product(pcf.pcf_id).await.unwrap().unwrap();
  assert_eq!(product.volume_litres(), Some(0.33));
}

#[tokio::test]
async fn unknown_pcf_reads_as_none_or_empty() {
  let s = store().await;
  let id = Uuid::new_v4();
  assert!(s.get_pcf(id).await.unwrap().is_none());
  assert!(s.get_product(id).await.unwrap().is_none());
  assert!(s.get_materials(id).await.unwrap().is_empty());
  assert!(s.get_facility_allocations(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_pcf_id_is_rejected() {
  let s = store().await;
  let id = Uuid::new_v4();
  s.add_pcf_with_id(id, new_pcf(SystemBoundary::CradleToGate))
    .await
    .unwrap();
  let err = s
    .add_pcf_with_id(id, new_pcf(SystemBoundary::CradleToGate))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicatePcf(dup) if dup == id));
}

// ─── Materials ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn materials_keep_insertion_order_and_fields() {
  let s = store().await;
  let pcf = s.add_pcf(new_pcf(SystemBoundary::CradleToGate)).await.unwrap();

  let mut malt = MaterialImpactRow::new("Barley malt", 0.12, QuantityUnit::Kg);
  malt.material_type = Some("ingredient".into());
  malt.impacts.climate.total = 0.3;
  malt.impacts.climate.biogenic = 0.02;
  malt.impacts.transport = 0.04;
  malt.impacts.water = 0.002;
  malt.impacts.midpoints.acidification = 0.0011;
  malt.gases.nitrous_oxide_kg = 0.0001;
  malt.confidence_score = Some(70.0);
  malt.data_quality_grade = Some(DataQualityGrade::Medium);
  malt.impact_source = Some("secondary".into());

  let mut can = MaterialImpactRow::new("Aluminium can", 15.0, QuantityUnit::G);
  can.material_type = Some("packaging".into());
  can.packaging_category = Some("aluminium".into());

  let mut label = MaterialImpactRow::new("Label", 1.0, QuantityUnit::Unit);
  label.material_type = None;

  for row in [&malt, &can, &label] {
    s.insert_material(pcf.pcf_id, row).await.unwrap();
  }

  let rows = s.get_materials(pcf.pcf_id).await.unwrap();
  let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, ["Barley malt", "Aluminium can", "Label"]);

  let m = &rows[0];
  assert_eq!(m.material_id, malt.material_id);
  assert_eq!(m.unit, QuantityUnit::Kg);
  assert_eq!(m.impacts.climate, malt.impacts.climate);
  assert_eq!(m.impacts.transport, 0.04);
  assert_eq!(m.impacts.water, 0.002);
  assert!((m.impacts.midpoints.acidification - 0.0011).abs() < 1e-15);
  assert!((m.gases.nitrous_oxide_kg - 0.0001).abs() < 1e-15);
  assert_eq!(m.confidence_score, Some(70.0));
  assert_eq!(m.data_quality_grade, Some(DataQualityGrade::Medium));
  assert_eq!(m.impact_source.as_deref(), Some("secondary"));

  assert_eq!(rows[1].unit, QuantityUnit::G);
  assert_eq!(rows[1].packaging_category.as_deref(), Some("aluminium"));
  assert_eq!(rows[2].unit, QuantityUnit::Unit);
  assert!(rows[2].material_type.is_none());
}

#[tokio::test]
async fn material_for_missing_pcf_is_rejected() {
  let s = store().await;
  let id = Uuid::new_v4();
  let row = MaterialImpactRow::new("Hops", 0.01, QuantityUnit::Kg);
  let err = s.insert_material(id, &row).await.unwrap_err();
  assert!(matches!(err, Error::PcfNotFound(missing) if missing == id));
}

#[tokio::test]
async fn materials_are_scoped_to_their_pcf() {
  let s = store().await;
  let a = s.add_pcf(new_pcf(SystemBoundary::CradleToGate)).await.unwrap();
  let b = s.add_pcf(new_pcf(SystemBoundary::CradleToGate)).await.unwrap();

  s.insert_material(a.pcf_id, &MaterialImpactRow::new("Malt", 0.1, QuantityUnit::Kg))
    .await
    .unwrap();

  assert_eq!(s.get_materials(a.pcf_id).await.unwrap().len(), 1);
  assert!(s.get_materials(b.pcf_id).await.unwrap().is_empty());
}

// ─── Import ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn import_pcf_writes_rows_together() {
  let s = store().await;
  let id = Uuid::new_v4();
  let rows = [
    MaterialImpactRow::new("Malt", 0.1, QuantityUnit::Kg),
    MaterialImpactRow::new("Hops", 0.01, QuantityUnit::Kg),
  ];
  let brewery = FacilityEmissionsAllocation {
    facility_id:              Uuid::new_v4(),
    facility_name:            Some("Brewery".into()),
    allocated_emissions:      100.0,
    scope1_emissions:         40.0,
    scope2_emissions:         60.0,
    product_volume:           1000.0,
    is_contract_manufacturer: false,
  };

  let record = s
    .import_pcf(id, new_pcf(SystemBoundary::CradleToShelf), &rows, &[brewery])
    .await
    .unwrap();

  assert_eq!(record.pcf_id, id);
  assert_eq!(s.get_materials(id).await.unwrap().len(), 2);
  assert_eq!(s.get_facility_allocations(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_import_rolls_back_and_can_be_retried() {
  let s = store().await;
  let id = Uuid::new_v4();
  let malt = MaterialImpactRow::new("Malt", 0.1, QuantityUnit::Kg);
  let mut hops = MaterialImpactRow::new("Hops", 0.01, QuantityUnit::Kg);
  hops.material_id = malt.material_id;

  let err = s
    .import_pcf(id, new_pcf(SystemBoundary::CradleToGate), &[malt.clone(), hops], &[])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err}");
  assert!(s.get_pcf(id).await.unwrap().is_none());
  assert!(s.get_materials(id).await.unwrap().is_empty());

  let hops = MaterialImpactRow::new("Hops", 0.01, QuantityUnit::Kg);
  s.import_pcf(id, new_pcf(SystemBoundary::CradleToGate), &[malt, hops], &[])
    .await
    .unwrap();
  assert_eq!(s.get_materials(id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_import_keeps_existing_rows() {
  let s = store().await;
  let id = Uuid::new_v4();
  let first = [MaterialImpactRow::new("Malt", 0.1, QuantityUnit::Kg)];
  s.import_pcf(id, new_pcf(SystemBoundary::CradleToGate), &first, &[])
    .await
    .unwrap();

  let second = [MaterialImpactRow::new("Sugar", 0.2, QuantityUnit::Kg)];
  let err = s
    .import_pcf(id, new_pcf(SystemBoundary::CradleToGate), &second, &[])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicatePcf(dup) if dup == id));

  let names: Vec<_> = s
    .get_materials(id)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.name)
    .collect();
  assert_eq!(names, ["Malt"]);
}

// ─── Facilities ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn facility_allocations_round_trip() {
  let s = store().await;
  let pcf = s.add_pcf(new_pcf(SystemBoundary::CradleToGate)).await.unwrap();

  let owned = FacilityEmissionsAllocation {
    facility_id:              Uuid::new_v4(),
    facility_name:            Some("Brewery".into()),
    allocated_emissions:      500.0,
    scope1_emissions:         200.0,
    scope2_emissions:         300.0,
    product_volume:           10_000.0,
    is_contract_manufacturer: false,
  };
  let contract = FacilityEmissionsAllocation {
    facility_id: Uuid::new_v4(),
    facility_name: None,
    is_contract_manufacturer: true,
    ..owned.clone()
  };

  s.insert_facility_allocation(pcf.pcf_id, &owned).await.unwrap();
  s.insert_facility_allocation(pcf.pcf_id, &contract).await.unwrap();

  let allocs = s.get_facility_allocations(pcf.pcf_id).await.unwrap();
  assert_eq!(allocs.len(), 2);
  assert_eq!(allocs[0].facility_id, owned.facility_id);
  assert_eq!(allocs[0].facility_name.as_deref(), Some("Brewery"));
  assert_eq!(allocs[0].scope2_emissions, 300.0);
  assert!(!allocs[0].is_contract_manufacturer);
  assert!(allocs[1].is_contract_manufacturer);
}

// ─── Aggregation over the store ──────────────────────────────────────────────

#[tokio::test]
async fn engine_aggregates_stored_pcf() {
  let s = store().await;
  let pcf = s.add_pcf(new_pcf(SystemBoundary::CradleToGate)).await.unwrap();

  let mut malt = MaterialImpactRow::new("Barley malt", 0.12, QuantityUnit::Kg);
  malt.impacts.climate.total = 0.3;
  malt.impacts.transport = 0.04;
  s.insert_material(pcf.pcf_id, &malt).await.unwrap();

  let result = cradle_engine::aggregate_product_impacts(
    &s,
    pcf.pcf_id,
    vec![],
    SystemBoundary::CradleToGate,
    None,
    None,
  )
  .await;

  assert!(result.success, "{:?}", result.error);
  assert_eq!(result.total_carbon_footprint, 0.3);
  assert_eq!(result.materials_count, 1);
}
