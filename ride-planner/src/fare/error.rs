//! Metrics error types.

/// Errors computing ride metrics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricsError {
    /// Consecutive path nodes are not joined by any edge
    #[error("broken path: no edge between {from} and {to}")]
    BrokenPath { from: String, to: String },
}
