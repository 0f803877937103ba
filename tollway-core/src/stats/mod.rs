//! Price attribution and per-way statistics

pub mod aggregator;
pub mod attribution;
pub mod usage;
pub mod welford;

pub use aggregator::{WayAccumulator, WayAggregator, WaySummary};
pub use attribution::{Contribution, apportion};
pub use usage::WayUsage;
pub use welford::{RunningStats, Variance};
