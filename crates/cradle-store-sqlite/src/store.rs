//! [`SqliteStore`]: the SQLite implementation of the Cradle repositories.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use cradle_core::{
  facility::FacilityEmissionsAllocation,
  material::MaterialImpactRow,
  pcf::{NewPcf, PcfRecord, ProductMetadata},
  repository::{FacilityEmissionsRepository, MaterialRepository},
};

use crate::{
  Error, Result,
  encode::{
    AllocationColumns, MaterialColumns, PcfColumns, RawAllocation, RawMaterial, RawPcf,
    encode_uuid,
  },
  schema::SCHEMA,
};

const PCF_COLUMNS: &str = "pcf_id, organization_id, product_name, system_boundary,
   unit_size_value, unit_size_unit, created_at";

fn raw_pcf(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPcf> {
  Ok(RawPcf {
    pcf_id:          row.get(0)?,
    organization_id: row.get(1)?,
    product_name:    row.get(2)?,
    system_boundary: row.get(3)?,
    unit_size_value: row.get(4)?,
    unit_size_unit:  row.get(5)?,
    created_at:      row.get(6)?,
  })
}

fn pcf_exists(conn: &rusqlite::Connection, pcf_id: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM pcfs WHERE pcf_id = ?1",
        rusqlite::params![pcf_id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Material, PCF and facility data backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests and one-shot runs.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_pcf_row(&self, pcf_id: Uuid) -> Result<Option<RawPcf>> {
    let id_str = encode_uuid(pcf_id);
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PCF_COLUMNS} FROM pcfs WHERE pcf_id = ?1"),
              rusqlite::params![id_str],
              raw_pcf,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  // ── Writes ──────────────────────────────────────────────────────────────────

  /// Create a PCF with a fresh id.
  pub async fn add_pcf(&self, input: NewPcf) -> Result<PcfRecord> {
    self.add_pcf_with_id(Uuid::new_v4(), input).await
  }

  /// Create a PCF under a caller-chosen id.
  pub async fn add_pcf_with_id(&self, pcf_id: Uuid, input: NewPcf) -> Result<PcfRecord> {
    self.import_pcf(pcf_id, input, &[], &[]).await
  }

  /// Create a PCF together with its material rows and facility allocations.
  ///
  /// All rows are written in one transaction: on any failure, including a
  /// duplicate `pcf_id`, nothing is stored.
  pub async fn import_pcf(
    &self,
    pcf_id: Uuid,
    input: NewPcf,
    materials: &[MaterialImpactRow],
    allocations: &[FacilityEmissionsAllocation],
  ) -> Result<PcfRecord> {
    let record = PcfRecord {
      pcf_id,
      organization_id: input.organization_id,
      product_name: input.product_name,
      system_boundary: input.system_boundary.to_string(),
      created_at: Utc::now(),
    };

    let pcf_cols = PcfColumns::new(&record, input.product);
    let material_cols = materials
      .iter()
      .map(|row| MaterialColumns::new(pcf_id, row))
      .collect::<Result<Vec<_>>>()?;
    let allocation_cols: Vec<_> = allocations
      .iter()
      .map(|a| AllocationColumns::new(pcf_id, a))
      .collect();

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if pcf_exists(&tx, &pcf_cols.pcf_id)? {
          return Ok(false);
        }

        pcf_cols.insert(&tx)?;
        for cols in &material_cols {
          cols.insert(&tx)?;
        }
        for cols in &allocation_cols {
          cols.insert(&tx)?;
        }

        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicatePcf(pcf_id));
    }
    Ok(record)
  }

  /// Append a material row to a PCF. Rows are read back in the order they
  /// were inserted.
  pub async fn insert_material(&self, pcf_id: Uuid, row: &MaterialImpactRow) -> Result<()> {
    let cols = MaterialColumns::new(pcf_id, row)?;
    let found = self
      .conn
      .call(move |conn| {
        if !pcf_exists(conn, &cols.pcf_id)? {
          return Ok(false);
        }
        cols.insert(conn)?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::PcfNotFound(pcf_id));
    }
    Ok(())
  }

  /// Record a facility's emissions against a PCF.
  pub async fn insert_facility_allocation(
    &self,
    pcf_id: Uuid,
    allocation: &FacilityEmissionsAllocation,
  ) -> Result<()> {
    let cols = AllocationColumns::new(pcf_id, allocation);
    let found = self
      .conn
      .call(move |conn| {
        if !pcf_exists(conn, &cols.pcf_id)? {
          return Ok(false);
        }
        cols.insert(conn)?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::PcfNotFound(pcf_id));
    }
    Ok(())
  }
}

// ─── MaterialRepository impl ─────────────────────────────────────────────────

impl MaterialRepository for SqliteStore {
  type Error = Error;

  async fn get_materials(&self, pcf_id: Uuid) -> Result<Vec<MaterialImpactRow>> {
    let id_str = encode_uuid(pcf_id);

    let raws: Vec<RawMaterial> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             material_id, name, material_type, packaging_category,
             quantity, unit,
             climate_total, climate_fossil, climate_biogenic, climate_dluc,
             transport, water, land, waste,
             midpoints_json, gases_json,
             confidence_score, data_quality_grade, impact_source
           FROM materials
           WHERE pcf_id = ?1
           ORDER BY rowid",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawMaterial {
              material_id:        row.get(0)?,
              name:               row.get(1)?,
              material_type:      row.get(2)?,
              packaging_category: row.get(3)?,
              quantity:           row.get(4)?,
              unit:               row.get(5)?,
              climate_total:      row.get(6)?,
              climate_fossil:     row.get(7)?,
              climate_biogenic:   row.get(8)?,
              climate_dluc:       row.get(9)?,
              transport:          row.get(10)?,
              water:              row.get(11)?,
              land:               row.get(12)?,
              waste:              row.get(13)?,
              midpoints_json:     row.get(14)?,
              gases_json:         row.get(15)?,
              confidence_score:   row.get(16)?,
              data_quality_grade: row.get(17)?,
              impact_source:      row.get(18)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMaterial::into_row).collect()
  }

  async fn get_pcf(&self, pcf_id: Uuid) -> Result<Option<PcfRecord>> {
    self
      .fetch_pcf_row(pcf_id)
      .await?
      .map(RawPcf::into_record)
      .transpose()
  }

  async fn get_product(&self, pcf_id: Uuid) -> Result<Option<ProductMetadata>> {
    Ok(self.fetch_pcf_row(pcf_id).await?.map(RawPcf::into_product))
  }
}

// ─── FacilityEmissionsRepository impl ────────────────────────────────────────

impl FacilityEmissionsRepository for SqliteStore {
  type Error = Error;

  async fn get_facility_allocations(
    &self,
    pcf_id: Uuid,
  ) -> Result<Vec<FacilityEmissionsAllocation>> {
    let id_str = encode_uuid(pcf_id);

    let raws: Vec<RawAllocation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             facility_id, facility_name, allocated_emissions,
             scope1_emissions, scope2_emissions, product_volume,
             is_contract_manufacturer
           FROM facility_allocations
           WHERE pcf_id = ?1
           ORDER BY allocation_id",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawAllocation {
              facility_id:              row.get(0)?,
              facility_name:            row.get(1)?,
              allocated_emissions:      row.get(2)?,
              scope1_emissions:         row.get(3)?,
              scope2_emissions:         row.get(4)?,
              product_volume:           row.get(5)?,
              is_contract_manufacturer: row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAllocation::into_allocation).collect()
  }
}
