//! Route caching.
//!
//! A pooled quote runs up to five searches, and callers comparing several
//! pairings repeat many of them. [`CachedRouter`] memoizes outcomes per
//! `(from, to)` pair for a single graph snapshot; a reloaded graph gets a
//! fresh router, so entries never outlive the graph they were computed on.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache as MokaCache;
use tracing::trace;

use crate::graph::GraphStore;
use crate::routing::{PathFinder, PathOutcome, RouteProvider};

/// Cache key: (from, to) node identifiers.
type RouteKey = (String, String);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached routes.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Route provider that memoizes A* results for one graph snapshot.
pub struct CachedRouter {
    graph: Arc<GraphStore>,
    routes: MokaCache<RouteKey, PathOutcome>,
}

impl CachedRouter {
    /// Create a cached router over `graph`.
    pub fn new(graph: Arc<GraphStore>, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { graph, routes }
    }

    /// The snapshot this router answers for.
    pub fn snapshot(&self) -> &Arc<GraphStore> {
        &self.graph
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.run_pending_tasks();
        self.routes.entry_count()
    }

    /// Invalidate all cached routes.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

impl RouteProvider for CachedRouter {
    fn route(&self, from: &str, to: &str) -> PathOutcome {
        let key = (from.to_string(), to.to_string());

        if let Some(cached) = self.routes.get(&key) {
            trace!(from, to, "route cache hit");
            return cached;
        }

        let outcome = PathFinder::new(&self.graph).route(from, to);
        self.routes.insert(key, outcome.clone());
        outcome
    }

    fn graph(&self) -> &GraphStore {
        &self.graph
    }
}
