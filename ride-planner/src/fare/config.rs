//! Fare configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// What to do when two consecutive path nodes share no edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingEdgePolicy {
    /// The hop contributes zero distance.
    #[default]
    Ignore,
    /// Fail with [`MetricsError::BrokenPath`](super::MetricsError::BrokenPath).
    Fail,
}

/// Errors loading or validating a fare configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("could not read fare config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON
    #[error("invalid fare config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid fare config: {0}")]
    Invalid(&'static str),
}

/// Parameters for converting distance into time and price.
///
/// Constructors validate their input, so a `FareConfig` always has a positive
/// speed, a non-negative fare and a discount within `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    /// Assumed average speed (km per hour).
    average_speed_kmh: f64,

    /// Fare per km travelled.
    price_per_km: f64,

    /// Fraction taken off a rider's shared-trip price when they agree to share.
    share_discount: f64,

    /// Handling of hops with no matching edge.
    missing_edge: MissingEdgePolicy,
}

impl FareConfig {
    /// Create a new configuration, rejecting out-of-range values.
    pub fn new(average_speed_kmh: f64, price_per_km: f64, share_discount: f64) -> Result<Self, ConfigError> {
        let config = Self {
            average_speed_kmh,
            price_per_km,
            share_discount,
            missing_edge: MissingEdgePolicy::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    pub fn price_per_km(&self) -> f64 {
        self.price_per_km
    }

    pub fn share_discount(&self) -> f64 {
        self.share_discount
    }

    pub fn missing_edge(&self) -> MissingEdgePolicy {
        self.missing_edge
    }

    /// Set the missing-edge policy.
    pub fn with_missing_edge(mut self, policy: MissingEdgePolicy) -> Self {
        self.missing_edge = policy;
        self
    }

    /// Check that every value is usable.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(ConfigError::Invalid("average speed must be positive"));
        }
        if !(self.price_per_km.is_finite() && self.price_per_km >= 0.0) {
            return Err(ConfigError::Invalid("price per km must be non-negative"));
        }
        if !(0.0..1.0).contains(&self.share_discount) {
            return Err(ConfigError::Invalid("share discount must be within [0, 1)"));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FareConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Time to cover `distance_km` at the average speed, in hours.
    pub fn hours_for(&self, distance_km: f64) -> f64 {
        distance_km / self.average_speed_kmh
    }

    /// Price of travelling `distance_km`.
    pub fn price_for(&self, distance_km: f64) -> f64 {
        distance_km * self.price_per_km
    }

    /// Price after the sharing discount.
    pub fn discounted(&self, price: f64) -> f64 {
        price * (1.0 - self.share_discount)
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 50.0,
            price_per_km: 10.0,
            share_discount: 0.3,
            missing_edge: MissingEdgePolicy::Ignore,
        }
    }
}
