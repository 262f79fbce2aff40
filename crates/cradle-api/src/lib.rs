//! JSON REST API for Cradle.
//!
//! Exposes an axum [`Router`] over any store implementing both
//! [`MaterialRepository`] and [`FacilityEmissionsRepository`]. Auth, TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", cradle_api::api_router(store.clone(), aggregator))
//! ```

pub mod error;
pub mod pcfs;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use cradle_core::repository::{FacilityEmissionsRepository, MaterialRepository};
use cradle_engine::Aggregator;

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:      Arc<S>,
  pub aggregator: Arc<Aggregator>,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:      Arc::clone(&self.store),
      aggregator: Arc::clone(&self.aggregator),
    }
  }
}

/// Build the API router for `store`, aggregating with `aggregator`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, aggregator: Aggregator) -> Router<()>
where
  S: MaterialRepository + FacilityEmissionsRepository + 'static,
{
  let state = ApiState { store, aggregator: Arc::new(aggregator) };

  Router::new()
    .route("/pcfs/{id}", get(pcfs::get_one::<S>))
    .route("/pcfs/{id}/materials", get(pcfs::materials::<S>))
    .route("/pcfs/{id}/facilities", get(pcfs::facilities::<S>))
    .route("/pcfs/{id}/aggregate", post(pcfs::aggregate::<S>))
    .with_state(state)
}
