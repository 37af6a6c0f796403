//! Location graph storage.
//!
//! A [`GraphStore`] holds named locations joined by undirected, weighted
//! edges. It is built once from an edge list (or incrementally with
//! [`GraphStore::add_edge`]) and only read while answering queries. A reload
//! replaces the whole node and edge set.

mod coords;
mod error;
mod loader;
mod shared;
mod store;

pub use coords::{Coordinates, EARTH_RADIUS_KM, InvalidCoordinates};
pub use error::GraphError;
pub use loader::{EdgeRecord, LoadReport, parse_coordinate_line, parse_edge_line};
pub use shared::SharedGraph;
pub use store::{Adjacency, GraphStore, Node, NodeIndex};
