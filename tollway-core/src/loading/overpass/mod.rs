//! Overpass JSON processing

mod processor;
mod raw_types;

pub use processor::{
    OverpassExtract, build_road_graph, create_road_graph, parse_overpass_str, read_overpass_file,
};
pub use raw_types::{GeoElement, OverpassResponse};
