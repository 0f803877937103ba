//! Shortest paths over the road graph

mod search;
mod state;

use std::fmt;
use std::str::FromStr;

use hashbrown::HashSet;
use log::trace;
use serde::{Deserialize, Serialize};

pub use search::{PathResult, multi_source_path, shortest_path};

use crate::{OsmNodeId, model::RoadGraph};

/// How candidate source anchors are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// One multi-source search per growing prefix of the candidate list,
    /// keeping the strictly shortest result
    #[default]
    Progressive,
    /// A single multi-source search over every candidate
    Collapsed,
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "progressive" => Ok(Self::Progressive),
            "collapsed" => Ok(Self::Collapsed),
            other => Err(format!(
                "unknown search strategy '{other}', expected 'progressive' or 'collapsed'"
            )),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Progressive => "progressive",
            Self::Collapsed => "collapsed",
        })
    }
}

/// Shortest path from the ordered source candidates to any target.
///
/// Both strategies return the same distance. They may pick different paths
/// when several are equally short: the progressive one keeps the path found
/// with the shortest prefix of candidates.
pub fn best_path(
    graph: &RoadGraph,
    ordered_sources: &[OsmNodeId],
    targets: &HashSet<OsmNodeId>,
    strategy: SearchStrategy,
) -> Option<PathResult> {
    match strategy {
        SearchStrategy::Collapsed => multi_source_path(graph, ordered_sources, targets),
        SearchStrategy::Progressive => {
            let mut best: Option<PathResult> = None;
            for prefix in 1..=ordered_sources.len() {
                let Some(found) = multi_source_path(graph, &ordered_sources[..prefix], targets)
                else {
                    continue;
                };
                trace!(
                    "Prefix of {prefix} source(s) reaches {:?} in {:.1} m",
                    found.target(),
                    found.distance_m
                );
                if best
                    .as_ref()
                    .is_none_or(|current| found.distance_m < current.distance_m)
                {
                    best = Some(found);
                }
            }
            best
        }
    }
}
