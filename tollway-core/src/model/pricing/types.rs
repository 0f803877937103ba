//! Typed view over the priced relations of a pricing document

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::OsmNodeId;

/// Vehicle class key such as `class_1`.
///
/// Classes are discovered from the data. Ordering is by length first so
/// that `class_10` sorts after `class_9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleClass(String);

impl VehicleClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for VehicleClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for VehicleClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleClass {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Price of one connection for each vehicle class
pub type ClassPrices = BTreeMap<VehicleClass, f64>;

/// Named toll station and where it sits on the road network
#[derive(Debug, Clone, PartialEq)]
pub struct Toll {
    pub name: String,
    /// Declared anchor nodes, most preferred first
    pub anchors: Vec<OsmNodeId>,
    /// Fallback location (x = longitude, y = latitude)
    pub location: Option<Point<f64>>,
}

impl Toll {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anchors: Vec::new(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_anchors(mut self, anchors: Vec<OsmNodeId>) -> Self {
        self.anchors = anchors;
        self
    }

    #[must_use]
    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some(Point::new(lon, lat));
        self
    }
}

/// Ordered pair of toll names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
}

impl Relation {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Priced relation between two tolls
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub relation: Relation,
    /// Index of the network holding the connection
    pub network: usize,
    /// Tariff distance in kilometers, `None` when absent or unparsable
    pub declared_km: Option<f64>,
    /// Parsed prices; unparsable entries are left out
    pub prices: ClassPrices,
}

impl Connection {
    /// Declared distance usable to apportion prices
    pub fn apportionable_km(&self) -> Option<f64> {
        self.declared_km.filter(|km| km.is_finite() && *km > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_classes_sort_by_length_then_name() {
        let mut classes: Vec<VehicleClass> = ["class_10", "class_2", "class_1", "class_9"]
            .into_iter()
            .map(VehicleClass::from)
            .collect();
        classes.sort();
        let names: Vec<&str> = classes.iter().map(VehicleClass::as_str).collect();
        assert_eq!(names, ["class_1", "class_2", "class_9", "class_10"]);
    }

    #[test]
    fn only_positive_distances_apportion() {
        let mut connection = Connection {
            relation: Relation::new("A", "B"),
            network: 0,
            declared_km: Some(12.5),
            prices: ClassPrices::new(),
        };
        assert_eq!(connection.apportionable_km(), Some(12.5));
        connection.declared_km = Some(0.0);
        assert_eq!(connection.apportionable_km(), None);
        connection.declared_km = None;
        assert_eq!(connection.apportionable_km(), None);
    }
}
