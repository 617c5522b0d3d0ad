//! Roster fetcher library
//!
//! Downloads the user roster from the GeoVictoria API through an in-memory
//! cache with stale-on-error fallback. The modules are exposed for the binary
//! and for integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod error;
pub mod fetch;
pub mod output;
