//! SQL schema for the Cradle SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS pcfs (
    pcf_id          TEXT PRIMARY KEY,
    organization_id TEXT NOT NULL,
    product_name    TEXT,
    system_boundary TEXT NOT NULL,   -- kept as written; unknown values read as gate
    unit_size_value REAL,
    unit_size_unit  TEXT,
    created_at      TEXT NOT NULL
);

-- Rows are read back in insertion order (rowid).
CREATE TABLE IF NOT EXISTS materials (
    material_id        TEXT PRIMARY KEY,
    pcf_id             TEXT NOT NULL REFERENCES pcfs(pcf_id),
    name               TEXT NOT NULL,
    material_type      TEXT,           -- 'ingredient' | 'packaging' | 'process_addition' | NULL
    packaging_category TEXT,
    quantity           REAL NOT NULL,
    unit               TEXT NOT NULL,
    climate_total      REAL NOT NULL DEFAULT 0,
    climate_fossil     REAL NOT NULL DEFAULT 0,
    climate_biogenic   REAL NOT NULL DEFAULT 0,
    climate_dluc       REAL NOT NULL DEFAULT 0,
    transport          REAL NOT NULL DEFAULT 0,
    water              REAL NOT NULL DEFAULT 0,
    land               REAL NOT NULL DEFAULT 0,
    waste              REAL NOT NULL DEFAULT 0,
    midpoints_json     TEXT NOT NULL DEFAULT '{}',
    gases_json         TEXT NOT NULL DEFAULT '{}',
    confidence_score   REAL,
    data_quality_grade TEXT,           -- 'HIGH' | 'MEDIUM' | 'LOW' | NULL
    impact_source      TEXT
);

CREATE TABLE IF NOT EXISTS facility_allocations (
    allocation_id            INTEGER PRIMARY KEY AUTOINCREMENT,
    pcf_id                   TEXT NOT NULL REFERENCES pcfs(pcf_id),
    facility_id              TEXT NOT NULL,
    facility_name            TEXT,
    allocated_emissions      REAL NOT NULL,
    scope1_emissions         REAL NOT NULL DEFAULT 0,
    scope2_emissions         REAL NOT NULL DEFAULT 0,
    product_volume           REAL NOT NULL,
    is_contract_manufacturer INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS materials_pcf_idx  ON materials(pcf_id);
CREATE INDEX IF NOT EXISTS facilities_pcf_idx ON facility_allocations(pcf_id);

PRAGMA user_version = 1;
";
