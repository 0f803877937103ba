use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, HashSet};
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::{OsmNodeId, model::RoadGraph};

/// Node path found by a search and its length
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Sum of edge weights in meters
    pub distance_m: f64,
    /// Node ids from a source to a target
    pub nodes: Vec<OsmNodeId>,
}

impl PathResult {
    pub fn target(&self) -> Option<OsmNodeId> {
        self.nodes.last().copied()
    }
}

/// Shortest path between two nodes.
///
/// Stops as soon as `dest` leaves the frontier. `None` when either node is
/// unknown or `dest` is unreachable.
pub fn shortest_path(graph: &RoadGraph, source: OsmNodeId, dest: OsmNodeId) -> Option<PathResult> {
    let source = graph.index_of(source)?;
    let dest = graph.index_of(dest)?;
    dijkstra(graph, &[source], |node| node == dest)
}

/// Shortest path from any of `sources` to any of `targets`.
///
/// All sources start at distance zero; unknown ids are ignored on both sides.
pub fn multi_source_path(
    graph: &RoadGraph,
    sources: &[OsmNodeId],
    targets: &HashSet<OsmNodeId>,
) -> Option<PathResult> {
    let sources: Vec<NodeIndex> = sources
        .iter()
        .filter_map(|&id| graph.index_of(id))
        .collect();
    if sources.is_empty() {
        return None;
    }

    let mut target_bits = FixedBitSet::with_capacity(graph.node_count());
    for idx in targets.iter().filter_map(|&id| graph.index_of(id)) {
        target_bits.insert(idx.index());
    }
    if target_bits.is_clear() {
        return None;
    }

    dijkstra(graph, &sources, |node| target_bits.contains(node.index()))
}

/// Binary heap Dijkstra over meter weights, stopping at the first settled
/// node accepted by `is_target`
fn dijkstra(
    graph: &RoadGraph,
    sources: &[NodeIndex],
    is_target: impl Fn(NodeIndex) -> bool,
) -> Option<PathResult> {
    // Estimate capacity based on graph size
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut settled = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    for &source in sources {
        if distances.insert(source, 0.0).is_none() {
            heap.push(State {
                cost: 0.0,
                node: source,
            });
        }
    }

    while let Some(State { cost, node }) = heap.pop() {
        // Stale entry of an already finalized node
        if settled.put(node.index()) {
            continue;
        }

        if is_target(node) {
            return Some(PathResult {
                distance_m: cost,
                nodes: reconstruct(graph, &predecessors, node),
            });
        }

        for edge in graph.graph.edges(node) {
            let next = edge.target();
            if settled.contains(next.index()) {
                continue;
            }
            let next_cost = cost + edge.weight().weight;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    None
}

/// Follows predecessors back from `target` to the source it was reached from
fn reconstruct(
    graph: &RoadGraph,
    predecessors: &HashMap<NodeIndex, NodeIndex>,
    target: NodeIndex,
) -> Vec<OsmNodeId> {
    let mut nodes = vec![graph.node_id(target)];
    let mut current = target;
    while let Some(&prev) = predecessors.get(&current) {
        nodes.push(graph.node_id(prev));
        current = prev;
    }
    nodes.reverse();
    nodes
}
