//! Toll pricing data model

pub mod de;
pub mod document;
pub mod types;

pub use document::{
    ConnectionPayload, ConnectionTable, Network, PricingDocument, TollDescription,
    WaySummaryRecord,
};
pub use types::{ClassPrices, Connection, Relation, Toll, VehicleClass};
