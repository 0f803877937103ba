use serde::{Deserialize, Serialize};

use crate::{routing::SearchStrategy, stats::Variance};

/// Options of an attribution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributionConfig {
    pub strategy: SearchStrategy,
    /// Route connections on the rayon thread pool
    pub parallel: bool,
    /// Divisor of the variances reported in exports
    pub variance: Variance,
}

impl AttributionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }
}
