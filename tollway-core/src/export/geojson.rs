//! `GeoJSON` view of the road network

use geo::{Coord, LineString, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use log::{info, warn};
use serde_json::{Map, Value, json};

use crate::{
    Error,
    model::{RoadGraph, RoadNode, Way},
};

/// Road network features and the ways that could not be drawn
#[derive(Debug, Clone)]
pub struct NetworkGeoJson {
    pub collection: FeatureCollection,
    pub nodes: usize,
    pub ways: usize,
    /// Ways referencing a node missing from the graph, or with fewer than
    /// two nodes
    pub skipped_ways: usize,
}

impl NetworkGeoJson {
    pub fn to_string_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(&self.collection)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

/// Every node as a `Point` and every way as a `LineString`, or a `Polygon`
/// when it closes on itself.
pub fn road_network_geojson(graph: &RoadGraph) -> Result<NetworkGeoJson, Error> {
    let mut features = Vec::with_capacity(graph.node_count() + graph.way_count());

    for node in graph.nodes() {
        features.push(node_feature(node)?);
    }
    let nodes = features.len();

    let mut skipped_ways = 0;
    for way in graph.ways() {
        match way_feature(graph, way)? {
            Some(feature) => features.push(feature),
            None => skipped_ways += 1,
        }
    }
    let ways = features.len() - nodes;

    if skipped_ways > 0 {
        warn!("{skipped_ways} ways without usable geometry left out of the GeoJSON");
    }
    info!("GeoJSON export: {nodes} nodes, {ways} ways");

    Ok(NetworkGeoJson {
        collection: FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        },
        nodes,
        ways,
        skipped_ways,
    })
}

fn node_feature(node: &RoadNode) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&node.geometry));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": { "@id": node.id, "@type": "node" }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn way_feature(graph: &RoadGraph, way: &Way) -> Result<Option<Feature>, Error> {
    let Some(mut coords) = way
        .nodes
        .iter()
        .map(|id| graph.node(*id).map(|node| Coord::from(node.geometry)))
        .collect::<Option<Vec<Coord<f64>>>>()
    else {
        return Ok(None);
    };
    if coords.len() < 2 {
        return Ok(None);
    }

    if way.is_closed() && coords.first() != coords.last() {
        coords.push(coords[0]);
    }
    let closed = coords.len() >= 4 && coords.first() == coords.last();
    let line = LineString::new(coords);
    let geometry = if closed {
        Geometry::new(GeoJsonValue::from(&Polygon::new(line, Vec::new())))
    } else {
        Geometry::new(GeoJsonValue::from(&line))
    };

    let mut properties = Map::new();
    properties.insert("@id".to_string(), json!(way.id));
    properties.insert("@type".to_string(), json!("way"));
    for (key, value) in &way.tags {
        properties.insert(key.clone(), Value::String(value.clone()));
    }

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": properties
    });
    serde_json::from_value::<Feature>(value)
        .map(Some)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}
