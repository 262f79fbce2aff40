//! Encoding and decoding helpers between Cradle domain types and the plain
//! column representations stored in SQLite.
//!
//! Timestamps are RFC 3339 strings. UUIDs are hyphenated lowercase strings.
//! Midpoint indicators and gas inventories are compact JSON.

use chrono::{DateTime, Utc};
use cradle_core::{
  facility::FacilityEmissionsAllocation,
  material::{
    ClimateImpact, DataQualityGrade, GasInventory, MaterialImpactRow, MaterialImpacts,
    MidpointIndicators, QuantityUnit,
  },
  pcf::{PcfRecord, ProductMetadata},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_midpoints(m: &MidpointIndicators) -> Result<String> {
  Ok(serde_json::to_string(m)?)
}

pub fn encode_gases(g: &GasInventory) -> Result<String> { Ok(serde_json::to_string(g)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `pcfs` row.
pub struct RawPcf {
  pub pcf_id:          String,
  pub organization_id: String,
  pub product_name:    Option<String>,
  pub system_boundary: String,
  pub unit_size_value: Option<f64>,
  pub unit_size_unit:  Option<String>,
  pub created_at:      String,
}

impl RawPcf {
  pub fn into_record(self) -> Result<PcfRecord> {
    Ok(PcfRecord {
      pcf_id:          decode_uuid(&self.pcf_id)?,
      organization_id: decode_uuid(&self.organization_id)?,
      product_name:    self.product_name,
      system_boundary: self.system_boundary,
      created_at:      decode_dt(&self.created_at)?,
    })
  }

  pub fn into_product(self) -> ProductMetadata {
    ProductMetadata {
      unit_size_value: self.unit_size_value,
      unit_size_unit:  self.unit_size_unit,
    }
  }
}

/// Raw values read directly from a `materials` row.
pub struct RawMaterial {
  pub material_id:        String,
  pub name:               String,
  pub material_type:      Option<String>,
  pub packaging_category: Option<String>,
  pub quantity:           f64,
  pub unit:               String,
  pub climate_total:      f64,
  pub climate_fossil:     f64,
  pub climate_biogenic:   f64,
  pub climate_dluc:       f64,
  pub transport:          f64,
  pub water:              f64,
  pub land:               f64,
  pub waste:              f64,
  pub midpoints_json:     String,
  pub gases_json:         String,
  pub confidence_score:   Option<f64>,
  pub data_quality_grade: Option<String>,
  pub impact_source:      Option<String>,
}

impl RawMaterial {
  pub fn into_row(self) -> Result<MaterialImpactRow> {
    let midpoints: MidpointIndicators = serde_json::from_str(&self.midpoints_json)?;
    let gases: GasInventory = serde_json::from_str(&self.gases_json)?;
    let data_quality_grade = self
      .data_quality_grade
      .as_deref()
      .map(DataQualityGrade::parse)
      .transpose()?;

    Ok(MaterialImpactRow {
      material_id: decode_uuid(&self.material_id)?,
      name: self.name,
      material_type: self.material_type,
      packaging_category: self.packaging_category,
      quantity: self.quantity,
      unit: QuantityUnit::parse(&self.unit)?,
      impacts: MaterialImpacts {
        climate: ClimateImpact {
          total:           self.climate_total,
          fossil:          self.climate_fossil,
          biogenic:        self.climate_biogenic,
          land_use_change: self.climate_dluc,
        },
        transport: self.transport,
        water: self.water,
        land: self.land,
        waste: self.waste,
        midpoints,
      },
      gases,
      confidence_score: self.confidence_score,
      data_quality_grade,
      impact_source: self.impact_source,
    })
  }
}

/// Raw values read directly from a `facility_allocations` row.
pub struct RawAllocation {
  pub facility_id:              String,
  pub facility_name:            Option<String>,
  pub allocated_emissions:      f64,
  pub scope1_emissions:         f64,
  pub scope2_emissions:         f64,
  pub product_volume:           f64,
  pub is_contract_manufacturer: bool,
}

impl RawAllocation {
  pub fn into_allocation(self) -> Result<FacilityEmissionsAllocation> {
    Ok(FacilityEmissionsAllocation {
      facility_id:              decode_uuid(&self.facility_id)?,
      facility_name:            self.facility_name,
      allocated_emissions:      self.allocated_emissions,
      scope1_emissions:         self.scope1_emissions,
      scope2_emissions:         self.scope2_emissions,
      product_volume:           self.product_volume,
      is_contract_manufacturer: self.is_contract_manufacturer,
    })
  }
}

// ─── Insert column sets ──────────────────────────────────────────────────────

/// Encoded column values for one `pcfs` insert.
pub struct PcfColumns {
  pub pcf_id:          String,
  pub organization_id: String,
  pub product_name:    Option<String>,
  pub system_boundary: String,
  pub unit_size_value: Option<f64>,
  pub unit_size_unit:  Option<String>,
  pub created_at:      String,
}

impl PcfColumns {
  pub fn new(record: &PcfRecord, product: ProductMetadata) -> Self {
    Self {
      pcf_id:          encode_uuid(record.pcf_id),
      organization_id: encode_uuid(record.organization_id),
      product_name:    record.product_name.clone(),
      system_boundary: record.system_boundary.clone(),
      unit_size_value: product.unit_size_value,
      unit_size_unit:  product.unit_size_unit,
      created_at:      encode_dt(record.created_at),
    }
  }

  pub fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute(
      "INSERT INTO pcfs (
         pcf_id, organization_id, product_name, system_boundary,
         unit_size_value, unit_size_unit, created_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
      rusqlite::params![
        self.pcf_id,
        self.organization_id,
        self.product_name,
        self.system_boundary,
        self.unit_size_value,
        self.unit_size_unit,
        self.created_at,
      ],
    )?;
    Ok(())
  }
}

/// Encoded column values for one `materials` insert.
pub struct MaterialColumns {
  pub material_id:        String,
  pub pcf_id:             String,
  pub name:               String,
  pub material_type:      Option<String>,
  pub packaging_category: Option<String>,
  pub quantity:           f64,
  pub unit:               String,
  pub climate:            ClimateImpact,
  pub transport:          f64,
  pub water:              f64,
  pub land:               f64,
  pub waste:              f64,
  pub midpoints_json:     String,
  pub gases_json:         String,
  pub confidence_score:   Option<f64>,
  pub data_quality_grade: Option<String>,
  pub impact_source:      Option<String>,
}

impl MaterialColumns {
  pub fn new(pcf_id: Uuid, row: &MaterialImpactRow) -> Result<Self> {
    Ok(Self {
      material_id:        encode_uuid(row.material_id),
      pcf_id:             encode_uuid(pcf_id),
      name:               row.name.clone(),
      material_type:      row.material_type.clone(),
      packaging_category: row.packaging_category.clone(),
      quantity:           row.quantity,
      unit:               row.unit.to_string(),
      climate:            row.impacts.climate,
      transport:          row.impacts.transport,
      water:              row.impacts.water,
      land:               row.impacts.land,
      waste:              row.impacts.waste,
      midpoints_json:     encode_midpoints(&row.impacts.midpoints)?,
      gases_json:         encode_gases(&row.gases)?,
      confidence_score:   row.confidence_score,
      data_quality_grade: row.data_quality_grade.map(|g| g.to_string()),
      impact_source:      row.impact_source.clone(),
    })
  }

  pub fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute(
      "INSERT INTO materials (
         material_id, pcf_id, name, material_type, packaging_category,
         quantity, unit,
         climate_total, climate_fossil, climate_biogenic, climate_dluc,
         transport, water, land, waste,
         midpoints_json, gases_json,
         confidence_score, data_quality_grade, impact_source
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                 ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
      rusqlite::params![
        self.material_id,
        self.pcf_id,
        self.name,
        self.material_type,
        self.packaging_category,
        self.quantity,
        self.unit,
        self.climate.total,
        self.climate.fossil,
        self.climate.biogenic,
        self.climate.land_use_change,
        self.transport,
        self.water,
        self.land,
        self.waste,
        self.midpoints_json,
        self.gases_json,
        self.confidence_score,
        self.data_quality_grade,
        self.impact_source,
      ],
    )?;
    Ok(())
  }
}

/// Encoded column values for one `facility_allocations` insert.
pub struct AllocationColumns {
  pub pcf_id:     String,
  pub facility:   String,
  pub allocation: FacilityEmissionsAllocation,
}

impl AllocationColumns {
  pub fn new(pcf_id: Uuid, allocation: &FacilityEmissionsAllocation) -> Self {
    Self {
      pcf_id:     encode_uuid(pcf_id),
      facility:   encode_uuid(allocation.facility_id),
      allocation: allocation.clone(),
    }
  }

  pub fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    let a = &self.allocation;
    conn.execute(
      "INSERT INTO facility_allocations (
         pcf_id, facility_id, facility_name, allocated_emissions,
         scope1_emissions, scope2_emissions, product_volume,
         is_contract_manufacturer
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
      rusqlite::params![
        self.pcf_id,
        self.facility,
        a.facility_name,
        a.allocated_emissions,
        a.scope1_emissions,
        a.scope2_emissions,
        a.product_volume,
        a.is_contract_manufacturer,
      ],
    )?;
    Ok(())
  }
}
