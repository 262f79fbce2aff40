//! Product impact aggregation engine.
//!
//! Turns the material rows of a Product Carbon Footprint into a
//! boundary-aware, scope-allocated [`AggregationResult`]. Pure computation
//! apart from the repository reads; no HTTP or database dependencies.
//!
//! # Pipeline
//!
//! 1. [`normalize`] resolves each row's kind and lifecycle stage.
//! 2. [`summation`] sums impacts and builds the hotspot table.
//! 3. [`gate`] decides which downstream stages the boundary includes.
//! 4. [`use_phase`] and [`end_of_life`] model those stages.
//! 5. [`facility`] allocates facility emissions and routes scopes.
//! 6. [`quality`] and [`ghg`] score the data and split the inventory.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use cradle_core::boundary::SystemBoundary;
//!
//! let result = cradle_engine::aggregate_product_impacts(
//!   &store, pcf_id, vec![], SystemBoundary::CradleToGate, None, None,
//! ).await;
//! println!("{} kg CO2e", result.total_carbon_footprint);
//! ```
//!
//! [`AggregationResult`]: cradle_core::result::AggregationResult

mod aggregate;
pub mod end_of_life;
pub mod error;
pub mod facility;
pub mod gate;
pub mod ghg;
pub mod methodology;
pub mod normalize;
pub mod quality;
pub mod rollup;
pub mod summation;
pub mod use_phase;
mod warning;

pub use aggregate::{
  AggregationRequest, Aggregator, FetchedInputs, aggregate_product_impacts,
};
pub use error::{Error, Result};
pub use methodology::Methodology;
pub use warning::Warning;

/// Tag stamped on every result so reports can cite the calculation revision.
pub const CALCULATION_VERSION: &str = concat!("cradle-engine/", env!("CARGO_PKG_VERSION"));
