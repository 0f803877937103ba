//! This module is responsible for loading the pricing document and the
//! Overpass road network a run works on.

mod builder;
mod config;
pub mod overpass;
pub mod pricing;

pub use builder::{Dataset, load_dataset, load_road_graph};
pub use config::DatasetConfig;
