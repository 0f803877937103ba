//! Anchoring tolls on the road graph, shortest paths and way translation

pub mod anchors;
pub mod dijkstra;
pub mod ways;

pub use anchors::{AnchorSource, AnchorTable, resolve_anchors, resolve_with_source};
pub use dijkstra::{PathResult, SearchStrategy, best_path, multi_source_path, shortest_path};
pub use ways::{WayStep, WayWalk, path_to_ways, walk_path};
