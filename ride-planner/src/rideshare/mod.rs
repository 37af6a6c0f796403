//! Ride pooling for two riders.
//!
//! A pooled ride is split into three legs: rider 1 alone to rider 2's
//! pickup, both riders to rider 1's drop-off, then rider 2 alone. Each rider
//! pays their solo leg in full and half of the shared leg. A flat discount
//! applies to the shared-trip price of riders who agree to share.

mod engine;


pub use engine::{Leg, PoolQuote, PoolRequest, PooledLegs, RideShareEngine, SharedRide};
