use std::path::PathBuf;

/// Input files of one attribution run
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Toll pricing document (JSON)
    pub pricing_path: PathBuf,
    /// Overpass response holding the road network (JSON)
    pub overpass_path: PathBuf,
}

impl DatasetConfig {
    pub fn new(pricing_path: impl Into<PathBuf>, overpass_path: impl Into<PathBuf>) -> Self {
        Self {
            pricing_path: pricing_path.into(),
            overpass_path: overpass_path.into(),
        }
    }
}
