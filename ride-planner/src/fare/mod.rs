//! Ride metrics: distance, time and price of a path.
//!
//! Time and price are fixed functions of distance under a [`FareConfig`],
//! so metrics are always recomputed from a path and never edited directly.

mod config;
mod error;
mod metrics;

pub use config::{ConfigError, FareConfig, MissingEdgePolicy};
pub use error::MetricsError;
pub use metrics::{MetricsCalculator, RideMetrics};
