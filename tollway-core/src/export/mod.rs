//! CSV and `GeoJSON` exports

pub mod connections_csv;
pub mod format;
pub mod geojson;
pub mod stats_csv;
pub mod summary_csv;

pub use connections_csv::write_connections_csv;
pub use geojson::{NetworkGeoJson, road_network_geojson};
pub use stats_csv::{way_stats_header, write_way_stats_csv};
pub use summary_csv::write_by_way_summary_csv;
