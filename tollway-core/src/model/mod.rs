//! Data model for way attribution
//!
//! Contains the road network built from OSM data and the toll pricing
//! document.

pub mod pricing;
pub mod road;

pub use pricing::{
    ClassPrices, Connection, ConnectionPayload, PricingDocument, Relation, Toll, VehicleClass,
    WaySummaryRecord,
};
pub use road::{Direction, LoadStats, RoadEdge, RoadGraph, RoadNode, Way};
