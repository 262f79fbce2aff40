//! `cradle` binary.
//!
//! Reads `cradle.toml` (or the path given with `--config`), opens the SQLite
//! store, and then serves the HTTP API, aggregates a single PCF to stdout, or
//! imports a JSON document.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cradle_core::{
  boundary::SystemBoundary,
  config::{EndOfLifeConfig, UsePhaseConfig},
  repository::FacilityEmissionsRepository,
};
use cradle_engine::{AggregationRequest, Aggregator};
use cradle_server::{ServerConfig, expand_tilde, import};
use cradle_store_sqlite::SqliteStore;
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about = "Cradle product footprint engine")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "cradle.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API.
  Serve,

  /// Aggregate one PCF and print the result as JSON.
  Aggregate {
    pcf_id: Uuid,

    /// Overrides the boundary declared on the PCF.
    #[arg(short, long)]
    boundary: Option<String>,

    /// JSON file holding a use-phase configuration.
    #[arg(long, value_name = "FILE")]
    use_phase: Option<PathBuf>,

    /// JSON file holding an end-of-life configuration.
    #[arg(long, value_name = "FILE")]
    eol: Option<PathBuf>,
  },

  /// Import PCFs, materials and facility allocations from a JSON document.
  Import { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so `aggregate` output stays clean JSON.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Serve => serve(store, server_cfg).await,
    Command::Aggregate { pcf_id, boundary, use_phase, eol } => {
      let request = AggregationRequest {
        pcf_id,
        system_boundary: boundary.as_deref().map(SystemBoundary::parse_or_default),
        facility_allocations: store
          .get_facility_allocations(pcf_id)
          .await
          .context("failed to read facility allocations")?,
        use_phase_config: use_phase
          .map(|p| read_json::<UsePhaseConfig>(&p))
          .transpose()?,
        eol_config: eol.map(|p| read_json::<EndOfLifeConfig>(&p)).transpose()?,
      };

      let result = Aggregator::new(server_cfg.methodology)
        .run(&store, &request)
        .await;
      println!("{}", serde_json::to_string_pretty(&result)?);
      if !result.success {
        anyhow::bail!("aggregation of PCF {pcf_id} failed");
      }
      Ok(())
    }
    Command::Import { file } => {
      let document: import::ImportDocument = read_json(&file)?;
      let summary = import::import(&store, document)
        .await
        .context("import failed")?;
      println!("{}", serde_json::to_string_pretty(&summary)?);
      Ok(())
    }
  }
}

async fn serve(store: SqliteStore, server_cfg: ServerConfig) -> anyhow::Result<()> {
  let address = server_cfg.address();
  let app = cradle_server::app(Arc::new(store), server_cfg.methodology);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

fn read_json<T: DeserializeOwned>(path: &std::path::Path) -> anyhow::Result<T> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {path:?}"))?;
  serde_json::from_str(&raw).with_context(|| format!("failed to parse {path:?}"))
}
