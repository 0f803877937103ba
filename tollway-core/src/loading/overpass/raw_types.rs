use hashbrown::HashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::{OsmNodeId, WayId};

/// Overpass API JSON response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(super) enum RawElement {
    Node(RawNode),
    Way(RawWay),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawNode {
    pub id: OsmNodeId,
    /// Number or numeric string
    pub lat: Value,
    pub lon: Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawWay {
    pub id: WayId,
    #[serde(default)]
    pub nodes: Vec<OsmNodeId>,
    #[serde(default)]
    pub tags: Option<HashMap<String, Value>>,
}

/// Geographic element the road graph is built from
#[derive(Debug, Clone, PartialEq)]
pub enum GeoElement {
    Node {
        id: OsmNodeId,
        lat: f64,
        lon: f64,
    },
    Way {
        id: WayId,
        nodes: Vec<OsmNodeId>,
        tags: HashMap<String, String>,
    },
}
