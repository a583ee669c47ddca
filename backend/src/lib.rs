//! # Freight Routing
//!
//! Daily trailer-to-depot allocation for parcel freight.
//!
//! Given the day's parcel volumes at each collection point, every trailer is
//! assigned to a sortation depot: nearest depot first, subject to the depot's
//! capacity at the trailer's estimated arrival time, with manual overrides and
//! an overflow rule for peak days. Runs are deterministic for a given input
//! snapshot.
//!
//! ## Architecture
//!
//! - [`models`]: Domain records (master data, planning inputs, run output)
//! - [`algorithms`]: Pure computations (distance ranking, capacity ramp,
//!   arrival estimate, pricing, override lookup, the allocation engine)
//! - [`services`]: Orchestration and roll-ups (day plans, depot summary, costs)
//! - [`db`]: Repository pattern, in-memory backend, data-entry service layer
//! - [`config`]: `routing.toml` loading
//! - [`io`]: JSON seed loading
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod config;
pub mod db;
pub mod io;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
