//! Ride planner.
//!
//! Finds shortest routes over a weighted location graph and prices solo
//! and pooled (two-rider) trips: "what would we each pay if we shared?"

pub mod cache;
pub mod fare;
pub mod graph;
pub mod report;
pub mod rideshare;
pub mod routing;
