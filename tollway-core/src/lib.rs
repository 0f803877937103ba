//! Way attribution engine for highway toll pricing data.
//!
//! Reconciles a toll pricing document (priced relations between named toll
//! stations) with a road network extracted from OpenStreetMap, finds which
//! ways every relation travels over and aggregates a per-way price profile.

pub mod error;
pub mod export;
pub mod geodesy;
pub mod loading;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod routing;
pub mod stats;

pub use error::Error;

/// OSM node identifier
pub type OsmNodeId = i64;
/// OSM way identifier
pub type WayId = i64;

/// Mean Earth radius used by every distance computation, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
