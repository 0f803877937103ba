pub use crate::{Error, OsmNodeId, WayId};

// Loading
pub use crate::loading::overpass::{create_road_graph, parse_overpass_str, read_overpass_file};
pub use crate::loading::pricing::{parse_pricing_str, read_pricing_document, write_pricing_document};
pub use crate::loading::{Dataset, DatasetConfig, load_dataset, load_road_graph};

// Model
pub use crate::model::{
    ClassPrices, Connection, LoadStats, PricingDocument, Relation, RoadGraph, Toll, VehicleClass,
};

// Routing and attribution
pub use crate::pipeline::{AnnotationReport, AttributionConfig, ConnectionIssue, annotate};
pub use crate::routing::{AnchorTable, SearchStrategy, WayWalk, best_path, walk_path};
pub use crate::stats::{RunningStats, Variance, WayAggregator, WayUsage};

// Export
pub use crate::export::{
    road_network_geojson, write_by_way_summary_csv, write_connections_csv, write_way_stats_csv,
};
