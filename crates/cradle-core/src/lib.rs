//! Core types and trait definitions for the Cradle footprint engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod boundary;
pub mod config;
pub mod error;
pub mod facility;
pub mod material;
pub mod pcf;
pub mod repository;
pub mod result;

pub use error::{Error, Result};
