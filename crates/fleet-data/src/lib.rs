//! Data layer for the fleet dashboard.
//!
//! Reads the shipment-tracking and photo exports, validates rows into typed
//! records, filters them, computes the overview aggregates and the per-driver
//! lookups, and assembles both into report pipelines.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod lookup;
pub mod normalizer;
pub mod reader;

#[cfg(test)]
mod test_support;

pub use fleet_core as core;
