use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info, warn};

use super::raw_types::{GeoElement, OverpassResponse, RawElement};
use crate::{
    Error,
    model::{
        RoadGraph, Way,
        pricing::de::{parse_decimal, value_to_cell},
    },
};

/// Elements read from an Overpass response
#[derive(Debug, Clone, Default)]
pub struct OverpassExtract {
    pub elements: Vec<GeoElement>,
    /// Nodes and ways without an id or with unusable coordinates
    pub malformed: usize,
    /// Elements that are neither nodes nor ways
    pub ignored: usize,
}

/// Parses an Overpass JSON response.
///
/// # Errors
///
/// Returns an error if the text is not JSON or has no `elements` array.
/// Individual malformed elements are skipped and counted.
pub fn parse_overpass_str(text: &str) -> Result<OverpassExtract, Error> {
    let response: OverpassResponse = serde_json::from_str(text)?;
    Ok(extract_elements(response))
}

/// Reads an Overpass JSON response from disk
///
/// # Errors
///
/// Returns an error if the file can not be opened or is not a valid response
pub fn read_overpass_file(path: &Path) -> Result<OverpassExtract, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let response: OverpassResponse = serde_json::from_reader(BufReader::new(file))?;
    Ok(extract_elements(response))
}

fn extract_elements(response: OverpassResponse) -> OverpassExtract {
    let mut extract = OverpassExtract {
        elements: Vec::with_capacity(response.elements.len()),
        ..OverpassExtract::default()
    };

    for value in response.elements {
        match serde_json::from_value::<RawElement>(value) {
            Ok(RawElement::Node(node)) => {
                match (parse_decimal(&node.lat), parse_decimal(&node.lon)) {
                    (Some(lat), Some(lon)) => extract.elements.push(GeoElement::Node {
                        id: node.id,
                        lat,
                        lon,
                    }),
                    _ => {
                        debug!(
                            "Skipping node {} with coordinates ({}, {})",
                            node.id, node.lat, node.lon
                        );
                        extract.malformed += 1;
                    }
                }
            }
            Ok(RawElement::Way(way)) => extract.elements.push(GeoElement::Way {
                id: way.id,
                nodes: way.nodes,
                tags: way
                    .tags
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(key, value)| (key, value_to_cell(&value)))
                    .collect(),
            }),
            Ok(RawElement::Other) => extract.ignored += 1,
            Err(e) => {
                debug!("Skipping malformed element: {e}");
                extract.malformed += 1;
            }
        }
    }

    extract
}

/// Builds the directed road graph from nodes and ways.
///
/// Nodes are loaded before any way, whatever the element order. Nodes with
/// non-finite coordinates are skipped and counted as malformed.
pub fn build_road_graph(elements: impl IntoIterator<Item = GeoElement>) -> RoadGraph {
    let mut graph = RoadGraph::new();
    let mut ways = Vec::new();

    for element in elements {
        match element {
            GeoElement::Node { id, lat, lon } => {
                if lat.is_finite() && lon.is_finite() {
                    graph.add_node(id, lat, lon);
                } else {
                    debug!("Skipping node {id} with coordinates ({lat}, {lon})");
                    graph.stats.malformed_elements += 1;
                }
            }
            GeoElement::Way { id, nodes, tags } => ways.push(Way::new(id, nodes, tags)),
        }
    }

    for way in ways {
        if way.nodes.len() < 2 {
            debug!("Way {} has {} node(s), no edge created", way.id, way.nodes.len());
        }
        graph.add_way(way);
    }

    graph
}

/// Builds the road graph of an Overpass extract and logs load diagnostics
pub fn create_road_graph(extract: OverpassExtract) -> RoadGraph {
    let OverpassExtract {
        elements,
        malformed,
        ignored,
    } = extract;

    let mut graph = build_road_graph(elements);
    graph.stats.malformed_elements += malformed;
    graph.stats.ignored_elements += ignored;

    let stats = &graph.stats;
    info!(
        "Road graph built: {} nodes, {} ways, {} directed edges",
        stats.nodes, stats.ways, stats.edges
    );
    if stats.malformed_elements > 0 || stats.broken_references > 0 {
        warn!(
            "{} malformed element(s) skipped, {} broken node reference(s) in ways",
            stats.malformed_elements, stats.broken_references
        );
    }
    if stats.duplicate_elements > 0 {
        warn!(
            "{} duplicate element id(s), first definition kept",
            stats.duplicate_elements
        );
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": 0.6,
        "elements": [
            { "type": "way", "id": 100, "nodes": [1, 2, 3], "tags": { "highway": "motorway", "lanes": 2 } },
            { "type": "node", "id": 1, "lat": 45.00, "lon": 6.00 },
            { "type": "node", "id": 2, "lat": 45.01, "lon": 6.00 },
            { "type": "node", "id": 3, "lat": 45.02, "lon": 6.00 },
            { "type": "node", "id": 4, "lat": "north", "lon": 6.00 },
            { "type": "node", "lat": 45.0, "lon": 6.0 },
            { "type": "way", "id": 101, "nodes": [3, 5] },
            { "type": "relation", "id": 9, "members": [] }
        ]
    }"#;

    #[test]
    fn parses_and_counts_malformed_elements() {
        let extract = parse_overpass_str(SAMPLE).unwrap();
        assert_eq!(extract.elements.len(), 5);
        assert_eq!(extract.malformed, 2);
        assert_eq!(extract.ignored, 1);
    }

    #[test]
    fn ways_may_precede_their_nodes() {
        let graph = create_road_graph(parse_overpass_str(SAMPLE).unwrap());
        assert_eq!(graph.node_count(), 3);
        assert!(graph.has_edge(1, 2));
        assert!(!graph.has_edge(2, 1));
        assert_eq!(graph.way(100).and_then(|w| w.tags.get("lanes").cloned()), Some("2".to_string()));
        assert_eq!(graph.stats.broken_references, 1);
        assert_eq!(graph.stats.malformed_elements, 2);
        assert_eq!(graph.stats.ignored_elements, 1);
    }

    #[test]
    fn empty_collection_gives_empty_graph() {
        let graph = create_road_graph(parse_overpass_str(r#"{ "elements": [] }"#).unwrap());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn missing_elements_array_is_an_error() {
        assert!(matches!(
            parse_overpass_str(r#"{ "version": 0.6 }"#),
            Err(Error::JsonError(_))
        ));
        assert!(parse_overpass_str("not json").is_err());
    }

    #[test]
    fn numeric_string_coordinates_are_read() {
        let extract = parse_overpass_str(
            r#"{
                "elements": [
                    { "type": "node", "id": 1, "lat": "45.0", "lon": " 6.0 " },
                    { "type": "node", "id": 2, "lat": 45.0, "lon": 6.1 },
                    { "type": "node", "id": 3, "lat": null, "lon": 6.2 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(extract.malformed, 1);
        assert_eq!(
            extract.elements[0],
            GeoElement::Node {
                id: 1,
                lat: 45.0,
                lon: 6.0
            }
        );
    }

    #[test]
    fn non_finite_nodes_are_malformed() {
        let graph = build_road_graph([
            GeoElement::Node {
                id: 1,
                lat: f64::NAN,
                lon: 6.0,
            },
            GeoElement::Node {
                id: 2,
                lat: 45.0,
                lon: 6.0,
            },
        ]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.stats.malformed_elements, 1);
    }
}
