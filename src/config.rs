use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tollway_core::pipeline::AttributionConfig;
use tollway_core::stats::Variance;

use crate::AnnotateArgs;

/// Settings read from the `--config` TOML file.
///
/// ```toml
/// [attribution]
/// strategy = "collapsed"
/// parallel = true
/// variance = "sample"
///
/// [export]
/// significant_digits = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub attribution: AttributionConfig,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Significant digits of the by-way summary CSV, below 2 keeps up to
    /// ten decimals
    pub significant_digits: usize,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// File settings with command line flags applied on top
    pub fn attribution(&self, args: &AnnotateArgs) -> AttributionConfig {
        let mut config = self.attribution;
        if let Some(strategy) = args.strategy {
            config.strategy = strategy;
        }
        if args.parallel {
            config.parallel = true;
        }
        if args.sample {
            config.variance = Variance::Sample;
        }
        config
    }
}
