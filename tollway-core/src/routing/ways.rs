//! Translation of a node path into the ways it travels

use itertools::Itertools;
use log::debug;

use crate::{OsmNodeId, WayId, model::RoadGraph, stats::WayUsage};

/// One traversed edge and the way chosen for it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WayStep {
    pub from: OsmNodeId,
    pub to: OsmNodeId,
    pub way: WayId,
    pub length_km: f64,
}

/// Edge-by-edge walk of a path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayWalk {
    pub steps: Vec<WayStep>,
    /// Consecutive pairs with no way carrying them
    pub skipped_edges: usize,
}

impl WayWalk {
    /// Way ids with consecutive repeats collapsed
    pub fn compact(&self) -> Vec<WayId> {
        self.steps.iter().map(|step| step.way).dedup().collect()
    }

    /// Way ids in order of first use
    pub fn unique(&self) -> Vec<WayId> {
        self.steps.iter().map(|step| step.way).unique().collect()
    }

    pub fn usage(&self) -> WayUsage {
        self.steps
            .iter()
            .map(|step| (step.way, step.length_km))
            .collect()
    }

    pub fn length_km(&self) -> f64 {
        self.steps.iter().map(|step| step.length_km).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Assigns a way to every edge of `path`.
///
/// The way of the previous edge is kept while it carries the next one. On a
/// change the choice looks one edge ahead and prefers a way that also
/// carries it, so that short overlaps do not cause spurious switches. Ties
/// go to the smallest way id.
pub fn walk_path(graph: &RoadGraph, path: &[OsmNodeId]) -> WayWalk {
    let pairs: Vec<(OsmNodeId, OsmNodeId)> = path.iter().copied().tuple_windows().collect();
    let candidates: Vec<Vec<WayId>> = pairs
        .iter()
        .map(|&(u, v)| graph.ways_for_edge(u, v))
        .collect();

    let mut walk = WayWalk::default();
    let mut current: Option<WayId> = None;

    for (i, &(from, to)) in pairs.iter().enumerate() {
        let here = &candidates[i];
        if here.is_empty() {
            debug!("No way carries edge {from} -> {to}, skipping");
            walk.skipped_edges += 1;
            continue;
        }

        let way = match current {
            Some(way) if here.contains(&way) => way,
            _ => candidates
                .get(i + 1)
                .and_then(|next| here.iter().copied().find(|way| next.contains(way)))
                .unwrap_or(here[0]),
        };

        let length_km = graph.segment_length_m(from, to).unwrap_or(0.0) / 1000.0;
        walk.steps.push(WayStep {
            from,
            to,
            way,
            length_km,
        });
        current = Some(way);
    }

    walk
}

/// Distinct ways of `path` in order of first use
pub fn path_to_ways(graph: &RoadGraph, path: &[OsmNodeId]) -> Vec<WayId> {
    walk_path(graph, path).unique()
}
