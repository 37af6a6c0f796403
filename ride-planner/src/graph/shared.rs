//! Shared graph handle with atomic reload.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::{GraphError, GraphStore, LoadReport};

/// Cloneable handle to the current graph snapshot.
///
/// Readers take an immutable `Arc<GraphStore>` and never hold the lock
/// while querying. A reload builds the replacement off to the side and swaps
/// it in; snapshots taken earlier keep seeing the old graph.
#[derive(Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<Arc<GraphStore>>>,
}

impl SharedGraph {
    /// Wrap an already-built graph.
    pub fn new(graph: GraphStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(graph))),
        }
    }

    /// The current graph snapshot.
    pub fn snapshot(&self) -> Arc<GraphStore> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the current graph.
    pub fn replace(&self, graph: GraphStore) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(graph);
    }

    /// Reload from an edge-list file and swap the result in.
    ///
    /// As with [`GraphStore::load_from_file`], a failed load installs an
    /// empty graph and returns the error.
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<LoadReport, GraphError> {
        let mut fresh = GraphStore::new();
        let result = fresh.load_from_file(path);
        let nodes = fresh.node_count();
        self.replace(fresh);
        info!(nodes, "graph snapshot swapped");
        result
    }
}
