//! Mapping toll stations to road graph nodes

use hashbrown::HashMap;
use log::{debug, info, warn};

use crate::{
    OsmNodeId,
    model::{RoadGraph, Toll},
};

/// How the anchors of a toll were found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSource {
    /// Declared node ids present in the graph
    Declared,
    /// Closest graph node to the toll coordinates
    Nearest,
    Unresolved,
}

/// Candidate nodes of a toll, most preferred first.
///
/// Declared anchors missing from the graph are dropped. When none is left
/// the closest node to the toll coordinates is used. Empty when the toll
/// can not be placed on the graph.
pub fn resolve_anchors(graph: &RoadGraph, toll: &Toll) -> Vec<OsmNodeId> {
    resolve_with_source(graph, toll).0
}

pub fn resolve_with_source(graph: &RoadGraph, toll: &Toll) -> (Vec<OsmNodeId>, AnchorSource) {
    let mut anchors: Vec<OsmNodeId> = Vec::with_capacity(toll.anchors.len());
    for &id in &toll.anchors {
        if graph.contains_node(id) && !anchors.contains(&id) {
            anchors.push(id);
        }
    }
    if !anchors.is_empty() {
        return (anchors, AnchorSource::Declared);
    }

    if let Some(location) = toll.location
        && let Some((node, distance)) = graph.nearest_node(location.y(), location.x())
    {
        debug!(
            "Toll {} snapped to node {node} ({distance:.0} m away)",
            toll.name
        );
        return (vec![node], AnchorSource::Nearest);
    }

    (Vec::new(), AnchorSource::Unresolved)
}

/// Resolved anchors of every toll of a run
#[derive(Debug, Clone, Default)]
pub struct AnchorTable {
    anchors: HashMap<String, Vec<OsmNodeId>>,
}

impl AnchorTable {
    pub fn build(graph: &RoadGraph, tolls: impl IntoIterator<Item = Toll>) -> Self {
        let mut anchors = HashMap::new();
        let (mut nearest, mut unresolved) = (0, 0);

        for toll in tolls {
            let (nodes, source) = resolve_with_source(graph, &toll);
            match source {
                AnchorSource::Declared => {}
                AnchorSource::Nearest => nearest += 1,
                AnchorSource::Unresolved => {
                    warn!("Toll {} can not be placed on the road graph", toll.name);
                    unresolved += 1;
                }
            }
            anchors.insert(toll.name, nodes);
        }

        info!(
            "Resolved anchors of {} tolls ({nearest} by nearest node, {unresolved} unresolved)",
            anchors.len()
        );
        Self { anchors }
    }

    /// Anchors of a toll, empty when unknown or unresolved
    pub fn get(&self, toll: &str) -> &[OsmNodeId] {
        self.anchors
            .get(toll)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_resolved(&self, toll: &str) -> bool {
        !self.get(toll).is_empty()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}
