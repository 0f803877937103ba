//! Per-way price statistics accumulated over many connections

use std::collections::BTreeMap;

use hashbrown::{HashMap, HashSet};

use super::{RunningStats, WayUsage, attribution::apportion};
use crate::{
    WayId,
    model::{ClassPrices, Relation, RoadGraph, VehicleClass},
};

/// Everything attributed to a single way
#[derive(Debug, Clone, Default)]
pub struct WayAccumulator {
    classes: BTreeMap<VehicleClass, RunningStats>,
    relations: Vec<Relation>,
    seen: HashSet<Relation>,
}

impl WayAccumulator {
    fn add_relation(&mut self, relation: &Relation) {
        if self.seen.insert(relation.clone()) {
            self.relations.push(relation.clone());
        }
    }

    /// Distinct relations attributed to the way, in recording order
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn class_stats(&self, class: &VehicleClass) -> Option<&RunningStats> {
        self.classes.get(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = (&VehicleClass, &RunningStats)> {
        self.classes.iter()
    }

    /// Sum of the contributions divided by the number of relations
    #[allow(clippy::cast_precision_loss)]
    pub fn average_price(&self, class: &VehicleClass) -> Option<f64> {
        let stats = self.classes.get(class)?;
        (!self.relations.is_empty()).then(|| stats.sum() / self.relations.len() as f64)
    }

    /// True when some class received a positive total
    pub fn has_priced_class(&self) -> bool {
        self.classes
            .values()
            .any(|stats| stats.count() > 0 && stats.sum() > 0.0)
    }

    fn merge(&mut self, other: Self) {
        for (class, stats) in other.classes {
            self.classes.entry(class).or_default().merge(&stats);
        }
        for relation in &other.relations {
            self.add_relation(relation);
        }
    }
}

/// Summary line of one way
#[derive(Debug, Clone, PartialEq)]
pub struct WaySummary {
    pub way: WayId,
    pub length_km: f64,
    pub average_price: BTreeMap<VehicleClass, f64>,
    pub relations: Vec<Relation>,
}

/// Accumulates price contributions per way and vehicle class.
///
/// Workers can each fill their own aggregator and [`merge`](Self::merge)
/// them afterwards.
#[derive(Debug, Clone, Default)]
pub struct WayAggregator {
    ways: HashMap<WayId, WayAccumulator>,
    recorded: usize,
}

impl WayAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes one connection.
    ///
    /// Returns `false`, leaving the aggregator untouched, when the usage is
    /// empty or the declared distance is not positive.
    pub fn record(
        &mut self,
        relation: &Relation,
        usage: &WayUsage,
        prices: &ClassPrices,
        declared_km: f64,
    ) -> bool {
        if usage.is_empty() || !(declared_km.is_finite() && declared_km > 0.0) {
            return false;
        }

        for (way, _) in usage.iter() {
            self.ways.entry(way).or_default().add_relation(relation);
        }
        for contribution in apportion(usage, prices, declared_km) {
            self.ways
                .entry(contribution.way)
                .or_default()
                .classes
                .entry(contribution.class)
                .or_default()
                .push(contribution.amount);
        }

        self.recorded += 1;
        true
    }

    /// Folds `other` into `self`; relations of `other` come after ours
    pub fn merge(&mut self, other: Self) {
        for (way, accumulator) in other.ways {
            self.ways.entry(way).or_default().merge(accumulator);
        }
        self.recorded += other.recorded;
    }

    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }

    pub fn get(&self, way: WayId) -> Option<&WayAccumulator> {
        self.ways.get(&way)
    }

    /// Number of connections recorded
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn len(&self) -> usize {
        self.ways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ways.is_empty()
    }

    /// Ways sorted by id
    pub fn iter(&self) -> impl Iterator<Item = (WayId, &WayAccumulator)> {
        let mut ways: Vec<_> = self.ways.iter().map(|(way, acc)| (*way, acc)).collect();
        ways.sort_unstable_by_key(|(way, _)| *way);
        ways.into_iter()
    }

    /// Union of the classes seen on any way
    pub fn classes(&self) -> Vec<VehicleClass> {
        let mut classes: Vec<VehicleClass> = self
            .ways
            .values()
            .flat_map(|acc| acc.classes.keys().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        classes.sort();
        classes
    }

    /// Average price per class of every way with at least one relation
    pub fn summary(&self, graph: &RoadGraph) -> Vec<WaySummary> {
        self.iter()
            .filter(|(_, acc)| !acc.relations.is_empty())
            .map(|(way, acc)| WaySummary {
                way,
                length_km: graph.way_length_km(way).unwrap_or(0.0),
                average_price: acc
                    .classes
                    .keys()
                    .filter_map(|class| Some((class.clone(), acc.average_price(class)?)))
                    .collect(),
                relations: acc.relations.clone(),
            })
            .collect()
    }
}
