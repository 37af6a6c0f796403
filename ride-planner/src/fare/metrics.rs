//! Per-path metrics.

use chrono::Duration;
use serde::Serialize;
use tracing::warn;

use super::{FareConfig, MetricsError, MissingEdgePolicy};
use crate::graph::GraphStore;
use crate::routing::Path;

/// Distance (km), time (hours) and price of a trip.
///
/// Values are only produced by [`MetricsCalculator`] or by combining legs,
/// and are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RideMetrics {
    distance: f64,
    time: f64,
    price: f64,
}

impl RideMetrics {
    /// Metrics of a trip that goes nowhere.
    pub fn zero() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(distance: f64, time: f64, price: f64) -> Self {
        Self {
            distance,
            time,
            price,
        }
    }

    /// Distance in km.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Travel time in hours.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Price in currency units.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Travel time as a Duration, rounded to whole seconds.
    pub fn travel_time(&self) -> Duration {
        Duration::seconds((self.time * 3600.0).round() as i64)
    }
}

/// Turns paths into [`RideMetrics`] using a graph's edge weights.
pub struct MetricsCalculator<'a> {
    graph: &'a GraphStore,
    config: &'a FareConfig,
}

impl<'a> MetricsCalculator<'a> {
    /// Create a calculator over `graph` with the given fares.
    pub fn new(graph: &'a GraphStore, config: &'a FareConfig) -> Self {
        Self { graph, config }
    }

    /// Metrics for travelling along `path`.
    ///
    /// Paths of zero or one node have zero distance. Each hop uses the first
    /// matching edge in the source node's adjacency list, so with parallel
    /// edges the earliest-added weight counts. A hop with no edge either adds
    /// nothing or fails, according to the configured [`MissingEdgePolicy`].
    pub fn segment_metrics(&self, path: &Path) -> Result<RideMetrics, MetricsError> {
        let distance = self.path_distance(path)?;
        Ok(self.metrics_for_distance(distance))
    }

    /// Metrics for an already-known distance.
    pub fn metrics_for_distance(&self, distance: f64) -> RideMetrics {
        RideMetrics {
            distance,
            time: self.config.hours_for(distance),
            price: self.config.price_for(distance),
        }
    }

    /// Total edge weight along `path`.
    pub fn path_distance(&self, path: &Path) -> Result<f64, MetricsError> {
        let mut total = 0.0;

        for (from, to) in path.hops() {
            match self.graph.edge_weight(from, to) {
                Some(weight) => total += weight,
                None => match self.config.missing_edge() {
                    MissingEdgePolicy::Ignore => {
                        warn!(from, to, "no edge between consecutive path nodes; counting zero distance");
                    }
                    MissingEdgePolicy::Fail => {
                        return Err(MetricsError::BrokenPath {
                            from: from.to_string(),
                            to: to.to_string(),
                        });
                    }
                },
            }
        }

        Ok(total)
    }
}
