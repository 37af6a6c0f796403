//! Shortest-path routing using A* search.
//!
//! Answers "what is the cheapest way from here to there?" over a
//! [`GraphStore`](crate::graph::GraphStore). Equal-cost alternatives are
//! resolved by node identifier, so repeated queries on the same graph
//! always return the same route.

mod search;

#[cfg(test)]
mod search_tests;

pub use search::{Path, PathFinder, PathOutcome, RouteProvider};
