use std::path::Path;

use log::info;

use super::config::DatasetConfig;
use super::overpass::{create_road_graph, read_overpass_file};
use super::pricing::read_pricing_document;
use crate::{
    Error,
    model::{PricingDocument, RoadGraph},
};

/// Pricing document and road graph of one run
#[derive(Debug, Clone)]
pub struct Dataset {
    pub document: PricingDocument,
    pub graph: RoadGraph,
}

/// Loads both inputs of the configuration
///
/// # Errors
///
/// Returns an error if a file is missing or structurally invalid
pub fn load_dataset(config: &DatasetConfig) -> Result<Dataset, Error> {
    validate_config(config)?;

    info!(
        "Processing road network (Overpass): {}",
        config.overpass_path.display()
    );

    // Parse the road network in a separate thread
    let overpass_path = config.overpass_path.clone();
    let graph_handle = std::thread::spawn(move || load_road_graph(&overpass_path));

    info!(
        "Processing pricing document: {}",
        config.pricing_path.display()
    );
    let document = read_pricing_document(&config.pricing_path)?;

    let graph = graph_handle
        .join()
        .map_err(|_| Error::UnrecoverableError("Road network thread panicked"))??;

    Ok(Dataset { document, graph })
}

/// Reads an Overpass file and builds its road graph
///
/// # Errors
///
/// Returns an error if the file can not be read or parsed
pub fn load_road_graph(path: &Path) -> Result<RoadGraph, Error> {
    let extract = read_overpass_file(path)?;
    Ok(create_road_graph(extract))
}

fn validate_config(config: &DatasetConfig) -> Result<(), Error> {
    for path in [&config.pricing_path, &config.overpass_path] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Input file not found: {}", path.display()),
            )));
        }
    }
    Ok(())
}
