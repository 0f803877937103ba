use hashbrown::HashSet;
use serde_json::json;
use tollway_core::prelude::*;
use tollway_core::routing::{resolve_anchors, shortest_path};
use tollway_core::stats::apportion;

fn graph_from(elements: serde_json::Value) -> RoadGraph {
    let extract = parse_overpass_str(&json!({ "elements": elements }).to_string()).unwrap();
    create_road_graph(extract)
}

fn class_1() -> VehicleClass {
    VehicleClass::from("class_1")
}

#[test]
fn oneway_is_not_travelled_backwards() {
    let graph = graph_from(json!([
        { "type": "node", "id": 1, "lat": 45.0, "lon": 6.0 },
        { "type": "node", "id": 2, "lat": 45.0, "lon": 6.01 },
        { "type": "way", "id": 10, "nodes": [1, 2], "tags": { "oneway": "yes" } }
    ]));

    assert!(shortest_path(&graph, 2, 1).is_none());
    let path = shortest_path(&graph, 1, 2).unwrap();
    assert_eq!(path.nodes, vec![1, 2]);
}

#[test]
fn toll_without_anchor_snaps_to_nearest_node() {
    let graph = graph_from(json!([
        { "type": "node", "id": 1, "lat": 45.00, "lon": 6.00 },
        { "type": "node", "id": 2, "lat": 45.05, "lon": 6.00 },
        { "type": "node", "id": 3, "lat": 45.10, "lon": 6.00 }
    ]));
    let toll = Toll::new("CHIGNIN").with_location(45.06, 6.0);

    assert_eq!(resolve_anchors(&graph, &toll), vec![2]);
}

#[test]
fn price_split_over_two_ways() {
    let usage: WayUsage = [(1, 4.0), (2, 6.0)].into_iter().collect();
    let prices: ClassPrices = [(class_1(), 5.0)].into_iter().collect();

    let shares = apportion(&usage, &prices, 10.0);
    let amounts: Vec<(WayId, f64)> = shares.iter().map(|c| (c.way, c.amount)).collect();
    assert_eq!(amounts.len(), 2);
    assert_eq!(amounts[0].0, 1);
    assert!((amounts[0].1 - 2.0).abs() < 1e-12);
    assert_eq!(amounts[1].0, 2);
    assert!((amounts[1].1 - 3.0).abs() < 1e-12);
}

#[test]
fn way_shared_by_two_relations() {
    let mut aggregator = WayAggregator::new();
    let usage: WayUsage = [(7, 1.0)].into_iter().collect();
    let prices = |p: f64| -> ClassPrices { [(class_1(), p)].into_iter().collect() };

    aggregator.record(&Relation::new("A", "B"), &usage, &prices(2.0), 1.0);
    aggregator.record(&Relation::new("C", "D"), &usage, &prices(4.0), 1.0);

    let way = aggregator.get(7).unwrap();
    let stats = way.class_stats(&class_1()).unwrap();
    assert!((way.average_price(&class_1()).unwrap() - 3.0).abs() < 1e-12);
    assert_eq!(stats.count(), 2);
    assert_eq!(stats.min(), Some(2.0));
    assert_eq!(stats.max(), Some(4.0));
}

#[test]
fn empty_network_leaves_every_connection_unresolved() {
    let graph = graph_from(json!([]));
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);

    let mut document = parse_pricing_str(
        &json!({
            "toll_description": {
                "A": { "node_id": [1], "lat": 45.0, "lon": 6.0 },
                "B": { "node_id": [2] }
            },
            "networks": [{ "connection": {
                "A": { "B": { "distance": 10, "price": { "class_1": 5 } } },
                "B": { "A": { "distance": 10, "price": { "class_1": 5 } } }
            } }]
        })
        .to_string(),
    )
    .unwrap();

    let report = annotate(&mut document, &graph, &AttributionConfig::default());
    assert_eq!(report.connections, 2);
    assert_eq!(report.unresolved, 2);
    assert!(report.aggregator.is_empty());

    for dests in document.networks[0].connection.values() {
        for payload in dests.values() {
            assert_eq!(payload.by_ways, Some(Vec::new()));
            assert!(payload.note.as_deref().unwrap().starts_with("OSM node not found"));
            assert_eq!(payload.reason.as_deref(), Some("unresolvable_source"));
        }
    }
}

#[test]
fn more_sources_never_lengthen_the_path() {
    let graph = graph_from(json!([
        { "type": "node", "id": 1, "lat": 45.0, "lon": 6.00 },
        { "type": "node", "id": 2, "lat": 45.0, "lon": 6.05 },
        { "type": "node", "id": 3, "lat": 45.0, "lon": 6.10 },
        { "type": "node", "id": 4, "lat": 45.0, "lon": 6.15 },
        { "type": "way", "id": 1, "nodes": [1, 2, 3, 4] }
    ]));
    let targets: HashSet<OsmNodeId> = [4].into_iter().collect();
    let sources = [1, 2, 3];

    let mut previous = f64::INFINITY;
    for prefix in 1..=sources.len() {
        let found = best_path(&graph, &sources[..prefix], &targets, SearchStrategy::Collapsed)
            .unwrap();
        assert!(found.distance_m <= previous);
        previous = found.distance_m;
    }
}

#[test]
fn annotated_document_round_trips_through_json() {
    let graph = graph_from(json!([
        { "type": "node", "id": 1, "lat": 45.0, "lon": 6.00 },
        { "type": "node", "id": 2, "lat": 45.0, "lon": 6.05 },
        { "type": "node", "id": 3, "lat": 45.0, "lon": 6.10 },
        { "type": "way", "id": 100, "nodes": [1, 2], "tags": { "highway": "motorway" } },
        { "type": "way", "id": 200, "nodes": [2, 3], "tags": { "highway": "motorway" } },
        { "type": "relation", "id": 5, "members": [] }
    ]));
    assert_eq!(graph.stats.ignored_elements, 1);

    let mut document = parse_pricing_str(
        &json!({
            "date": "01/02/2025",
            "version": "1.0",
            "toll_description": {
                "A": { "node_id": ["1"], "operator": "ASF" },
                "B": { "node_id": [3] }
            },
            "networks": [{
                "network_name": "network_1",
                "connection": {
                    "A": { "B": { "distance": "7,9", "two_sides": "true",
                                  "price": { "class_1": "2,10", "class_2": "3.20" } } }
                }
            }]
        })
        .to_string(),
    )
    .unwrap();

    let report = annotate(&mut document, &graph, &AttributionConfig::default());
    assert_eq!(report.annotated, 1);
    assert_eq!(report.classes.len(), 2);

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["toll_description"]["A"]["operator"], "ASF");
    assert_eq!(value["networks"][0]["network_name"], "network_1");
    let payload = &value["networks"][0]["connection"]["A"]["B"];
    assert_eq!(payload["two_sides"], "true");
    assert_eq!(payload["by_ways"], json!(["100", "200"]));
    assert!(payload.get("_note").is_none());
    assert_eq!(value["by_way"]["100"]["relation"], json!([{ "from": "A", "to": "B" }]));
    assert!(value["by_way"]["200"]["average_price"]["class_2"].is_string());
}
