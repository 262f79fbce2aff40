//! Configuration, import and application-level tests.

use std::{path::Path, sync::Arc};

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use cradle_core::repository::MaterialRepository as _;
use cradle_engine::Methodology;
use cradle_store_sqlite::SqliteStore;
use serde_json::Value;
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::{
  ServerConfig, app, expand_tilde,
  import::{ImportDocument, import},
};

const DOCUMENT: &str = r#"{
  "pcfs": [{
    "pcf_id": "6f1c1f9e-2a4b-4c55-9a53-2d0f3c1b7e01",
    "organization_id": "0b7e3a52-93a1-4f0e-8c1f-5d2a6b9e4c10",
    "product_name": "Pale ale 330ml",
    "system_boundary": "cradle-to-grave",
    "product": { "unit_size_value": 330, "unit_size_unit": "ml" },
    "materials": [
      {
        "name": "Barley malt",
        "material_type": "ingredient",
        "quantity": 0.12,
        "unit": "kg",
        "impacts": { "climate": { "total": 0.3, "fossil": 0.25 }, "transport": 0.04 },
        "confidence_score": 70
      },
      {
        "name": "Aluminium can",
        "material_type": "packaging",
        "packaging_category": "aluminium",
        "quantity": 15,
        "unit": "g",
        "impacts": { "climate": { "total": 0.12 } },
        "data_quality_grade": "HIGH"
      }
    ],
    "facility_allocations": [{
      "facility_id": "a3d9f6c2-1b7e-4e0a-9f3c-8b2d5e6a7c41",
      "allocated_emissions": 500,
      "scope1_emissions": 200,
      "scope2_emissions": 300,
      "product_volume": 10000
    }]
  }]
}"#;

fn pcf_id() -> Uuid { Uuid::parse_str("6f1c1f9e-2a4b-4c55-9a53-2d0f3c1b7e01").unwrap() }

async fn imported_store() -> SqliteStore {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let document: ImportDocument = serde_json::from_str(DOCUMENT).unwrap();
  import(&store, document).await.unwrap();
  store
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn missing_config_file_uses_defaults() {
  let path = std::env::temp_dir().join(format!("cradle-{}.toml", Uuid::new_v4()));
  let cfg = ServerConfig::load(&path).unwrap();
  assert_eq!(cfg.port, 8080);
  assert_eq!(cfg.methodology, Methodology::default());
}

#[test]
fn config_file_overrides_methodology_tables() {
  let path = std::env::temp_dir().join(format!("cradle-{}.toml", Uuid::new_v4()));
  std::fs::write(
    &path,
    r#"
host = "0.0.0.0"
port = 9000
store_path = "/tmp/cradle.db"

[methodology.grid]
global_average = 0.5
"#,
  )
  .unwrap();

  let cfg = ServerConfig::load(&path).unwrap();
  std::fs::remove_file(&path).ok();

  assert_eq!(cfg.address(), "0.0.0.0:9000");
  assert_eq!(cfg.methodology.grid.global_average, 0.5);
  assert_eq!(
    cfg.methodology.grid.countries,
    Methodology::default().grid.countries
  );
  assert_eq!(cfg.methodology.gwp, Methodology::default().gwp);
}

#[test]
fn tilde_expands_to_home() {
  let Ok(home) = std::env::var("HOME") else {
    return;
  };
  assert_eq!(
    expand_tilde(Path::new("~/cradle.db")),
    Path::new(&home).join("cradle.db")
  );
  assert_eq!(expand_tilde(Path::new("/var/cradle.db")), Path::new("/var/cradle.db"));
}

// ─── Import ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn import_writes_everything() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let document: ImportDocument = serde_json::from_str(DOCUMENT).unwrap();
  let summary = import(&store, document).await.unwrap();

  assert_eq!(summary.pcf_ids, [pcf_id()]);
  assert_eq!(summary.materials, 2);
  assert_eq!(summary.facility_allocations, 1);
}

#[tokio::test]
async fn reimporting_the_same_pcf_fails() {
  let store = imported_store().await;
  let document: ImportDocument = serde_json::from_str(DOCUMENT).unwrap();
  assert!(import(&store, document).await.is_err());
}

#[tokio::test]
async fn failed_import_stores_nothing_for_that_pcf() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let mut document: Value = serde_json::from_str(DOCUMENT).unwrap();
  let repeated = "9d2e4b71-5c3a-4f8e-b1d0-7a6c2e9f3b55";
  for material in document["pcfs"][0]["materials"].as_array_mut().unwrap() {
    material["material_id"] = Value::from(repeated);
  }

  let broken: ImportDocument = serde_json::from_value(document).unwrap();
  assert!(import(&store, broken).await.is_err());
  assert!(store.get_pcf(pcf_id()).await.unwrap().is_none());
  assert!(store.get_materials(pcf_id()).await.unwrap().is_empty());

  let fixed: ImportDocument = serde_json::from_str(DOCUMENT).unwrap();
  let summary = import(&store, fixed).await.unwrap();
  assert_eq!(summary.pcf_ids, [pcf_id()]);
  assert_eq!(store.get_materials(pcf_id()).await.unwrap().len(), 2);
}

// ─── Application ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn app_serves_api_under_prefix() {
  let store = imported_store().await;
  let router = app(Arc::new(store), Methodology::default());

  let req = Request::builder()
    .method("POST")
    .uri(format!("/api/pcfs/{}/aggregate", pcf_id()))
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{}"))
    .unwrap();
  let resp = router.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(body["success"], true);
  assert_eq!(body["system_boundary"], "cradle-to-grave");
  assert_eq!(body["production_sites_count"], 1);

  // Declared grave boundary with no configs: both downstream stages warn.
  assert_eq!(body["warnings"].as_array().unwrap().len(), 2);
  let total = body["total_carbon_footprint"].as_f64().unwrap();
  assert!((total - (0.3 + 0.12 + 0.05)).abs() < 1e-9, "total {total}");
}

#[tokio::test]
async fn app_without_prefix_is_404() {
  let store = imported_store().await;
  let router = app(Arc::new(store), Methodology::default());
  let req = Request::builder()
    .uri(format!("/pcfs/{}", pcf_id()))
    .body(Body::empty())
    .unwrap();
  let resp = router.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
