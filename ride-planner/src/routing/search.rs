//! A* shortest-path search.
//!
//! Finds the cheapest route between two named locations, guided by the
//! great-circle distance to the goal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::{debug, trace};

use crate::graph::{GraphStore, NodeIndex};

static EMPTY_PATH: Path = Path::empty();

/// An ordered sequence of node identifiers, start to end inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path {
    nodes: Vec<String>,
}

impl Path {
    /// A path with no nodes.
    pub const fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a path from node identifiers.
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    /// Node identifiers in travel order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the path has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consecutive `(from, to)` pairs.
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// Consume the path, returning the identifiers.
    pub fn into_nodes(self) -> Vec<String> {
        self.nodes
    }
}

impl From<Vec<&str>> for Path {
    fn from(nodes: Vec<&str>) -> Self {
        Self::new(nodes.into_iter().map(str::to_string).collect())
    }
}

/// `A -> B -> C`, or `(no route)` when empty.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return f.write_str("(no route)");
        }
        f.write_str(&self.nodes.join(" -> "))
    }
}

/// Result of a path query.
///
/// The four cases are kept distinct: a trivial route, a real one, two known
/// but disconnected locations, and an identifier the graph has never seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum PathOutcome {
    /// A route with at least one hop.
    Found(Path),
    /// Start and end are the same node; the path is `[start]`.
    SameNode(Path),
    /// Both nodes exist but no route joins them.
    NoRoute,
    /// The named node is not in the graph.
    UnknownNode(String),
}

impl PathOutcome {
    /// The route's path, or an empty path when there is none.
    pub fn path(&self) -> &Path {
        match self {
            PathOutcome::Found(path) | PathOutcome::SameNode(path) => path,
            PathOutcome::NoRoute | PathOutcome::UnknownNode(_) => &EMPTY_PATH,
        }
    }

    /// Consume the outcome, returning its path (empty when there is none).
    pub fn into_path(self) -> Path {
        match self {
            PathOutcome::Found(path) | PathOutcome::SameNode(path) => path,
            PathOutcome::NoRoute | PathOutcome::UnknownNode(_) => Path::empty(),
        }
    }

    /// Returns true if a route exists (including the trivial one).
    pub fn is_reachable(&self) -> bool {
        matches!(self, PathOutcome::Found(_) | PathOutcome::SameNode(_))
    }
}

/// Something that can answer route queries over a graph.
///
/// This abstraction lets the ride-share engine run over a plain search, a
/// cached one, or fixed test routes.
pub trait RouteProvider {
    /// Find a route from `from` to `to`.
    fn route(&self, from: &str, to: &str) -> PathOutcome;

    /// The graph the routes are drawn from.
    fn graph(&self) -> &GraphStore;
}

/// Frontier entry, ordered so that `BinaryHeap` pops the lowest `f` first
/// and, among equal `f`, the lexicographically smallest node identifier.
#[derive(Debug)]
struct FrontierEntry<'g> {
    f: OrderedFloat<f64>,
    g: f64,
    node: NodeIndex,
    name: &'g str,
}

impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.name.cmp(self.name))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}

/// A* path finder over a borrowed graph.
///
/// The heuristic is the haversine distance from a node to the goal. It is
/// zero whenever either node lacks coordinates, so on a graph without
/// coordinates the search is exactly Dijkstra's algorithm. The heuristic is
/// admissible only if no edge is shorter than the great-circle distance
/// between its endpoints.
pub struct PathFinder<'g> {
    graph: &'g GraphStore,
}

impl<'g> PathFinder<'g> {
    /// Create a path finder over `graph`.
    pub fn new(graph: &'g GraphStore) -> Self {
        Self { graph }
    }

    /// Shortest route as a bare node sequence.
    ///
    /// `[start]` when start equals end; empty when either node is unknown or
    /// no route exists.
    pub fn shortest_path(&self, start: &str, end: &str) -> Vec<String> {
        self.route(start, end).into_path().into_nodes()
    }

    /// Shortest route with the reason when there is none.
    pub fn route(&self, start: &str, end: &str) -> PathOutcome {
        let Some(start_idx) = self.graph.index_of(start) else {
            return PathOutcome::UnknownNode(start.to_string());
        };
        let Some(goal_idx) = self.graph.index_of(end) else {
            return PathOutcome::UnknownNode(end.to_string());
        };

        if start_idx == goal_idx {
            return PathOutcome::SameNode(Path::new(vec![start.to_string()]));
        }

        match self.search(start_idx, goal_idx) {
            Some(path) => PathOutcome::Found(path),
            None => PathOutcome::NoRoute,
        }
    }

    /// Estimated remaining cost from `node` to `goal` in km.
    pub fn heuristic(&self, node: NodeIndex, goal: NodeIndex) -> f64 {
        let coords = |idx| self.graph.node(idx).and_then(|n| n.coordinates());
        match (coords(node), coords(goal)) {
            (Some(a), Some(b)) => a.haversine_km(&b),
            _ => 0.0,
        }
    }

    fn search(&self, start: NodeIndex, goal: NodeIndex) -> Option<Path> {
        let n = self.graph.node_count();
        let mut best = vec![f64::INFINITY; n];
        let mut came_from: Vec<Option<NodeIndex>> = vec![None; n];
        let mut frontier = BinaryHeap::new();
        let mut expanded = 0usize;

        best[start.0] = 0.0;
        frontier.push(self.entry(start, 0.0, goal));

        while let Some(FrontierEntry { g, node, name, .. }) = frontier.pop() {
            // Superseded by a cheaper entry pushed later
            if g > best[node.0] {
                continue;
            }

            if node == goal {
                debug!(expanded, cost = g, "route found");
                return Some(self.reconstruct(&came_from, start, goal));
            }

            expanded += 1;
            trace!(node = name, g, "expanding");

            for adj in self.graph.neighbors(node) {
                let tentative = g + adj.distance;
                if tentative < best[adj.neighbor.0] {
                    best[adj.neighbor.0] = tentative;
                    came_from[adj.neighbor.0] = Some(node);
                    frontier.push(self.entry(adj.neighbor, tentative, goal));
                }
            }
        }

        debug!(expanded, "frontier exhausted, no route");
        None
    }

    fn entry(&self, node: NodeIndex, g: f64, goal: NodeIndex) -> FrontierEntry<'g> {
        let name = self.graph.node(node).map(|n| n.name()).unwrap_or_default();
        FrontierEntry {
            f: OrderedFloat(g + self.heuristic(node, goal)),
            g,
            node,
            name,
        }
    }

    fn reconstruct(&self, came_from: &[Option<NodeIndex>], start: NodeIndex, goal: NodeIndex) -> Path {
        let mut nodes = Vec::new();
        let mut current = goal;
        nodes.push(current);
        while current != start {
            match came_from[current.0] {
                Some(prev) => {
                    current = prev;
                    nodes.push(current);
                }
                None => break,
            }
        }
        nodes.reverse();

        Path::new(
            nodes
                .into_iter()
                .filter_map(|idx| self.graph.node(idx).map(|n| n.name().to_string()))
                .collect(),
        )
    }
}

impl RouteProvider for PathFinder<'_> {
    fn route(&self, from: &str, to: &str) -> PathOutcome {
        PathFinder::route(self, from, to)
    }

    fn graph(&self) -> &GraphStore {
        self.graph
    }
}
