//! Shared vocabulary for the fleet dashboard.
//!
//! Domain models for shipment-tracking records and filters, the status colour
//! table, cell coercion helpers, calendar and formatting utilities, the error
//! type, and command-line settings.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod status;
pub mod time_utils;

pub use error::{FleetError, Result};
