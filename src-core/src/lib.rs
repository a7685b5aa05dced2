//! WealthTrack Core - accounts, balance snapshots and the chart engine.
//!
//! This crate is storage-agnostic: it defines repository traits for accounts
//! and balances, and the services that turn recorded balances into monthly
//! chart series and long-range growth predictions.

pub mod accounts;
pub mod balances;
pub mod charts;
pub mod errors;
pub mod settings;

pub use charts::{ChartSeries, ChartService, ChartServiceTrait};
pub use settings::ChartSettings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
