//! Graph store error types.

use std::path::PathBuf;

use super::InvalidCoordinates;

/// Errors raised while building or loading a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The source file could not be opened or read
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Edge weight is negative or not a finite number
    #[error("invalid distance {distance} for edge {from} - {to}")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    /// Node identifier is empty or contains whitespace
    #[error("invalid node identifier: {0:?}")]
    InvalidNodeId(String),

    /// Coordinates outside the valid range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// Node is not present in the graph
    #[error("unknown node: {0}")]
    UnknownNode(String),
}
