//! Serde model of the toll pricing document.
//!
//! Only the fields the engine reads or writes are typed; everything else is
//! kept in `extra` and written back unchanged.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de::{one_or_many, parse_decimal, parse_node_id, way_keyed};
use super::types::{ClassPrices, Connection, Relation, Toll, VehicleClass};
use crate::WayId;

/// Source toll -> destination toll -> priced connection
pub type ConnectionTable = BTreeMap<String, BTreeMap<String, ConnectionPayload>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub toll_description: BTreeMap<String, TollDescription>,
    #[serde(default)]
    pub networks: Vec<Network>,
    /// Per-way summary, filled by the attribution pipeline
    #[serde(
        default,
        deserialize_with = "way_keyed",
        skip_serializing_if = "Option::is_none"
    )]
    pub by_way: Option<BTreeMap<WayId, WaySummaryRecord>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TollDescription {
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub node_id: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Connected group of tolls and their priced connections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub connection: ConnectionTable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Value>,
    #[serde(default)]
    pub price: BTreeMap<String, Value>,
    /// Way ids travelled, in path order
    #[serde(default, alias = "by_way", skip_serializing_if = "Option::is_none")]
    pub by_ways: Option<Vec<Value>>,
    /// Why `by_ways` is empty
    #[serde(rename = "_note", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Machine-readable code matching `note`
    #[serde(rename = "_reason", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of the top-level `by_way` block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaySummaryRecord {
    /// Way length in kilometers
    #[serde(default)]
    pub length: Value,
    #[serde(default)]
    pub average_price: BTreeMap<String, Value>,
    #[serde(default)]
    pub relation: Vec<Relation>,
}

impl PricingDocument {
    /// Publication date, written `dd/mm/YYYY` or ISO
    pub fn issued_on(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(date, "%d/%m/%Y")
            .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
            .ok()
    }

    pub fn tolls(&self) -> impl Iterator<Item = Toll> + '_ {
        self.toll_description
            .iter()
            .map(|(name, description)| description.to_toll(name))
    }

    /// All connections in network, source and destination order
    pub fn connections(&self) -> Vec<Connection> {
        self.networks
            .iter()
            .enumerate()
            .flat_map(|(network, net)| {
                net.connection.iter().flat_map(move |(from, dests)| {
                    dests.iter().map(move |(to, payload)| Connection {
                        relation: Relation::new(from.as_str(), to.as_str()),
                        network,
                        declared_km: payload.declared_km(),
                        prices: payload.prices(),
                    })
                })
            })
            .collect()
    }

    pub fn connection_count(&self) -> usize {
        self.networks
            .iter()
            .flat_map(|net| net.connection.values())
            .map(BTreeMap::len)
            .sum()
    }

    /// Every vehicle class priced somewhere in the document
    pub fn vehicle_classes(&self) -> Vec<VehicleClass> {
        self.networks
            .iter()
            .flat_map(|net| net.connection.values())
            .flat_map(BTreeMap::values)
            .flat_map(|payload| payload.price.keys())
            .map(|key| VehicleClass::new(key.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn payload_mut(&mut self, connection: &Connection) -> Option<&mut ConnectionPayload> {
        self.networks
            .get_mut(connection.network)?
            .connection
            .get_mut(&connection.relation.from)?
            .get_mut(&connection.relation.to)
    }

    pub fn payload(&self, connection: &Connection) -> Option<&ConnectionPayload> {
        self.networks
            .get(connection.network)?
            .connection
            .get(&connection.relation.from)?
            .get(&connection.relation.to)
    }
}

impl TollDescription {
    /// Declared anchor nodes in order, non-numeric entries dropped
    pub fn anchors(&self) -> Vec<crate::OsmNodeId> {
        self.node_id.iter().filter_map(parse_node_id).collect()
    }

    pub fn location(&self) -> Option<Point<f64>> {
        let lat = self.lat.as_ref().and_then(parse_decimal)?;
        let lon = self.lon.as_ref().and_then(parse_decimal)?;
        Some(Point::new(lon, lat))
    }

    pub fn to_toll(&self, name: &str) -> Toll {
        Toll {
            name: name.to_string(),
            anchors: self.anchors(),
            location: self.location(),
        }
    }
}

impl ConnectionPayload {
    pub fn declared_km(&self) -> Option<f64> {
        self.distance.as_ref().and_then(parse_decimal)
    }

    pub fn prices(&self) -> ClassPrices {
        self.price
            .iter()
            .filter_map(|(class, value)| {
                parse_decimal(value).map(|price| (VehicleClass::new(class.as_str()), price))
            })
            .collect()
    }

    /// Way ids already attached to the connection
    pub fn way_ids(&self) -> Vec<WayId> {
        self.by_ways
            .iter()
            .flatten()
            .filter_map(parse_node_id)
            .collect()
    }
}

impl WaySummaryRecord {
    pub fn length_km(&self) -> f64 {
        parse_decimal(&self.length).unwrap_or(0.0)
    }

    pub fn average_price(&self, class: &str) -> f64 {
        self.average_price
            .get(class)
            .and_then(parse_decimal)
            .unwrap_or(0.0)
    }
}
