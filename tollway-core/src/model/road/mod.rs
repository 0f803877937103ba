//! Road network model

pub mod components;
pub mod network;
pub mod way;

pub use components::{RoadEdge, RoadNode};
pub use network::{LoadStats, RoadGraph};
pub use way::{Direction, Way};
