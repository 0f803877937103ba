//! Directed road graph built from OSM nodes and ways

use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::{RoadEdge, RoadNode, Way};
use crate::{OsmNodeId, WayId, geodesy::distance_m};

/// Diagnostic counters collected while the graph is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub nodes: usize,
    pub ways: usize,
    pub edges: usize,
    /// Elements skipped because of a missing id or unusable coordinates
    pub malformed_elements: usize,
    /// Elements of another type (relations, areas...)
    pub ignored_elements: usize,
    /// Nodes or ways whose id was already loaded
    pub duplicate_elements: usize,
    /// Consecutive node pairs referencing a node absent from the node table
    pub broken_references: usize,
}

/// Road network with one-way semantics applied.
///
/// Read-only once built. Parallel edges produced by overlapping ways are
/// kept as separate edges.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    pub graph: DiGraph<RoadNode, RoadEdge>,
    node_index: HashMap<OsmNodeId, NodeIndex>,
    ways: Vec<Way>,
    way_index: HashMap<WayId, usize>,
    way_lengths_km: HashMap<WayId, f64>,
    pub stats: LoadStats,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, returns `None` if the id is already present
    pub fn add_node(&mut self, id: OsmNodeId, lat: f64, lon: f64) -> Option<NodeIndex> {
        if self.node_index.contains_key(&id) {
            self.stats.duplicate_elements += 1;
            return None;
        }
        let idx = self.graph.add_node(RoadNode::new(id, lat, lon));
        self.node_index.insert(id, idx);
        self.stats.nodes += 1;
        Some(idx)
    }

    /// Adds the directed edges of a way and records its total length.
    ///
    /// All nodes must be added first: pairs referencing an unknown node are
    /// skipped and counted as broken references. Returns `false` if the way
    /// id is already present.
    pub fn add_way(&mut self, way: Way) -> bool {
        if self.way_index.contains_key(&way.id) {
            self.stats.duplicate_elements += 1;
            return false;
        }

        let direction = way.direction();
        let mut length_m = 0.0;

        for (&u, &v) in way.nodes.iter().tuple_windows() {
            let (Some(u_idx), Some(v_idx)) = (self.index_of(u), self.index_of(v)) else {
                debug!("Way {} references a missing node in pair ({u}, {v})", way.id);
                self.stats.broken_references += 1;
                continue;
            };

            let weight = self.coordinate_distance_m(u_idx, v_idx);
            length_m += weight;

            let edge = RoadEdge {
                weight,
                way: way.id,
            };
            if direction.allows_forward() {
                self.graph.add_edge(u_idx, v_idx, edge);
                self.stats.edges += 1;
            }
            if direction.allows_reverse() {
                self.graph.add_edge(v_idx, u_idx, edge);
                self.stats.edges += 1;
            }
        }

        self.way_lengths_km.insert(way.id, length_m / 1000.0);
        self.way_index.insert(way.id, self.ways.len());
        self.ways.push(way);
        self.stats.ways += 1;
        true
    }

    pub fn index_of(&self, id: OsmNodeId) -> Option<NodeIndex> {
        self.node_index.get(&id).copied()
    }

    pub fn contains_node(&self, id: OsmNodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn node(&self, id: OsmNodeId) -> Option<&RoadNode> {
        self.index_of(id)
            .and_then(|idx| self.graph.node_weight(idx))
    }

    /// OSM id of a graph node
    ///
    /// # Panics
    ///
    /// If `idx` does not belong to this graph
    pub fn node_id(&self, idx: NodeIndex) -> OsmNodeId {
        self.graph[idx].id
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.graph.node_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    /// Ways in load order
    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.ways.iter()
    }

    pub fn way(&self, id: WayId) -> Option<&Way> {
        self.way_index.get(&id).map(|&pos| &self.ways[pos])
    }

    /// Total length of the way in kilometers, both directions ignored
    pub fn way_length_km(&self, id: WayId) -> Option<f64> {
        self.way_lengths_km.get(&id).copied()
    }

    /// Directed edge `u -> v` exists
    pub fn has_edge(&self, u: OsmNodeId, v: OsmNodeId) -> bool {
        match (self.index_of(u), self.index_of(v)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Ways producing the directed edge `u -> v`, sorted and deduplicated
    pub fn ways_for_edge(&self, u: OsmNodeId, v: OsmNodeId) -> Vec<WayId> {
        let (Some(a), Some(b)) = (self.index_of(u), self.index_of(v)) else {
            return Vec::new();
        };
        let mut ways: Vec<WayId> = self
            .graph
            .edges_connecting(a, b)
            .map(|edge| edge.weight().way)
            .collect();
        ways.sort_unstable();
        ways.dedup();
        ways
    }

    /// Distance in meters between two loaded nodes
    pub fn segment_length_m(&self, u: OsmNodeId, v: OsmNodeId) -> Option<f64> {
        let a = self.index_of(u)?;
        let b = self.index_of(v)?;
        Some(self.coordinate_distance_m(a, b))
    }

    /// Closest node to a coordinate and its distance in meters.
    ///
    /// Linear scan over every node, ties keep the first loaded node.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Option<(OsmNodeId, f64)> {
        let mut best: Option<(OsmNodeId, f64)> = None;
        for node in self.graph.node_weights() {
            let d = distance_m(lat, lon, node.lat(), node.lon());
            if best.is_none_or(|(_, best_d)| d < best_d) && !d.is_nan() {
                best = Some((node.id, d));
            }
        }
        best
    }

    /// Outgoing edges of a node as `(neighbor, weight, way)`
    pub fn neighbors(&self, id: OsmNodeId) -> Vec<(OsmNodeId, f64, WayId)> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.graph
            .edges(idx)
            .map(|edge| {
                (
                    self.node_id(edge.target()),
                    edge.weight().weight,
                    edge.weight().way,
                )
            })
            .collect()
    }

    fn coordinate_distance_m(&self, a: NodeIndex, b: NodeIndex) -> f64 {
        let (from, to) = (&self.graph[a], &self.graph[b]);
        distance_m(from.lat(), from.lon(), to.lat(), to.lon())
    }
}
