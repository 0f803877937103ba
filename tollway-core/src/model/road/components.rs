//! Road network components - nodes and directed edges

use geo::Point;

use crate::{OsmNodeId, WayId};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// OSM ID of the node
    pub id: OsmNodeId,
    /// Node coordinates (x = longitude, y = latitude)
    pub geometry: Point<f64>,
}

impl RoadNode {
    pub fn new(id: OsmNodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            geometry: Point::new(lon, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }
}

/// Directed road segment between two consecutive nodes of a way
#[derive(Debug, Clone, Copy)]
pub struct RoadEdge {
    /// Segment length in meters
    pub weight: f64,
    /// Way the segment was produced from
    pub way: WayId,
}

impl RoadEdge {
    pub fn length_km(&self) -> f64 {
        self.weight / 1000.0
    }
}
