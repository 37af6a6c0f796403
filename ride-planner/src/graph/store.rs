//! In-memory location graph.
//!
//! Nodes live in a single table addressed by [`NodeIndex`]; adjacency
//! entries refer to neighbours by index, so the store owns every node and no
//! entry holds a reference into another.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use super::{Coordinates, GraphError};

/// Position of a node in the store's node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// One direction of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacency {
    /// The node at the far end of the edge.
    pub neighbor: NodeIndex,
    /// Edge weight (distance in km).
    pub distance: f64,
}

/// A named location.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    coordinates: Option<Coordinates>,
    adjacency: Vec<Adjacency>,
}

impl Node {
    fn new(name: String) -> Self {
        Self {
            name,
            coordinates: None,
            adjacency: Vec::new(),
        }
    }

    /// The node's identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coordinates, if any were set.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Adjacency entries in insertion order.
    pub fn adjacency(&self) -> &[Adjacency] {
        &self.adjacency
    }
}

/// Undirected weighted graph of named locations.
///
/// Every edge is stored as two adjacency entries of equal weight. Parallel
/// edges between the same pair are kept as separate entries.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    index: HashMap<String, NodeIndex>,
    edge_count: usize,
}

impl GraphStore {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an undirected edge, creating either endpoint if absent.
    ///
    /// The distance must be finite and non-negative. On error the store is
    /// unchanged.
    pub fn add_edge(&mut self, a: &str, b: &str, distance: f64) -> Result<(), GraphError> {
        validate_node_id(a)?;
        validate_node_id(b)?;
        if !distance.is_finite() || distance < 0.0 {
            return Err(GraphError::InvalidDistance {
                from: a.to_string(),
                to: b.to_string(),
                distance,
            });
        }

        let ia = self.intern(a);
        let ib = self.intern(b);

        self.nodes[ia.0].adjacency.push(Adjacency {
            neighbor: ib,
            distance,
        });
        self.nodes[ib.0].adjacency.push(Adjacency {
            neighbor: ia,
            distance,
        });
        self.edge_count += 1;

        trace!(from = a, to = b, distance, "edge added");
        Ok(())
    }

    /// Set the coordinates of an existing node.
    pub fn set_coordinates(&mut self, name: &str, coordinates: Coordinates) -> Result<(), GraphError> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))?;
        self.nodes[idx.0].coordinates = Some(coordinates);
        Ok(())
    }

    /// Set the coordinates of an existing node from raw degrees.
    pub fn set_position(&mut self, name: &str, lat: f64, lon: f64) -> Result<(), GraphError> {
        let coordinates = Coordinates::new(lat, lon)?;
        self.set_coordinates(name, coordinates)
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.edge_count = 0;
    }

    /// Look up a node's index by identifier.
    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Check whether a node with this identifier exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get a node by index.
    pub fn node(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx.0)
    }

    /// Get a node by identifier.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.index_of(name).and_then(|idx| self.node(idx))
    }

    /// Adjacency entries of a node (empty for an out-of-range index).
    pub fn neighbors(&self, idx: NodeIndex) -> &[Adjacency] {
        self.nodes
            .get(idx.0)
            .map(|n| n.adjacency.as_slice())
            .unwrap_or(&[])
    }

    /// Weight of the first edge from `from` to `to` in adjacency order.
    ///
    /// With parallel edges of differing weights the earliest-added one wins.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.neighbors(from)
            .iter()
            .find(|adj| adj.neighbor == to)
            .map(|adj| adj.distance)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges added (parallel edges counted separately).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes with their indices.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    /// All node identifiers, sorted.
    pub fn node_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.iter().map(|n| n.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn intern(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.index.get(name) {
            return *idx;
        }
        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(Node::new(name.to_string()));
        self.index.insert(name.to_string(), idx);
        idx
    }
}

fn validate_node_id(name: &str) -> Result<(), GraphError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(GraphError::InvalidNodeId(name.to_string()));
    }
    Ok(())
}

/// One line per node, sorted by name: `A -> (B, 10) (C, 20)`.
impl fmt::Display for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut order: Vec<&Node> = self.nodes.iter().collect();
        order.sort_by(|a, b| a.name.cmp(&b.name));

        for node in order {
            write!(f, "{} ->", node.name)?;
            for adj in &node.adjacency {
                let neighbor = &self.nodes[adj.neighbor.0].name;
                write!(f, " ({}, {})", neighbor, adj.distance)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
