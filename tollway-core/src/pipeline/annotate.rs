//! Routing every priced connection and attributing its price to ways

use std::collections::BTreeMap;

use hashbrown::HashSet;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde_json::Value;

use super::{AttributionConfig, ConnectionIssue, ConnectionOutcome, RoutedConnection};
use crate::{
    OsmNodeId, WayId,
    export::format::{format_fixed, format_general},
    model::{Connection, PricingDocument, RoadGraph, VehicleClass, WaySummaryRecord},
    routing::{AnchorTable, SearchStrategy, best_path, walk_path},
    stats::{WayAggregator, WaySummary},
};

/// Counters and statistics of an attribution run
#[derive(Debug, Clone, Default)]
pub struct AnnotationReport {
    pub connections: usize,
    /// Connections with a path
    pub annotated: usize,
    /// Connections with a toll missing from the graph
    pub unresolved: usize,
    pub no_path: usize,
    /// Routed connections left out of the statistics for lack of a
    /// positive declared distance
    pub skipped_no_distance: usize,
    /// Path edges no way could be assigned to
    pub broken_steps: usize,
    pub aggregator: WayAggregator,
    /// Vehicle classes priced in the document
    pub classes: Vec<VehicleClass>,
}

impl AnnotationReport {
    fn count(&mut self, connection: &Connection, outcome: &ConnectionOutcome) {
        self.connections += 1;
        match outcome {
            Ok(routed) => {
                self.annotated += 1;
                self.broken_steps += routed.walk.skipped_edges;
                if !routed.walk.is_empty() && connection.apportionable_km().is_none() {
                    self.skipped_no_distance += 1;
                }
            }
            Err(ConnectionIssue::NoPath) => self.no_path += 1,
            Err(_) => self.unresolved += 1,
        }
    }
}

/// Routes one connection between the anchors of its tolls
pub fn attribute_connection(
    graph: &RoadGraph,
    anchors: &AnchorTable,
    connection: &Connection,
    strategy: SearchStrategy,
) -> ConnectionOutcome {
    let sources = anchors.get(&connection.relation.from);
    if sources.is_empty() {
        return Err(ConnectionIssue::UnresolvableSource);
    }
    let targets: HashSet<OsmNodeId> = anchors
        .get(&connection.relation.to)
        .iter()
        .copied()
        .collect();
    if targets.is_empty() {
        return Err(ConnectionIssue::UnresolvableDestination);
    }

    let path = best_path(graph, sources, &targets, strategy).ok_or(ConnectionIssue::NoPath)?;
    let walk = walk_path(graph, &path.nodes);
    Ok(RoutedConnection { path, walk })
}

fn record(
    mut aggregator: WayAggregator,
    connection: &Connection,
    outcome: &ConnectionOutcome,
) -> WayAggregator {
    if let (Ok(routed), Some(declared_km)) = (outcome, connection.apportionable_km()) {
        aggregator.record(
            &connection.relation,
            &routed.walk.usage(),
            &connection.prices,
            declared_km,
        );
    }
    aggregator
}

/// Finds the ways of every connection of `document` and aggregates prices.
///
/// Each connection payload gets a `by_ways` list, plus a `_note` and a
/// `_reason` code when no path could be found. The top-level `by_way`
/// block is replaced with the per-way summary.
pub fn annotate(
    document: &mut PricingDocument,
    graph: &RoadGraph,
    config: &AttributionConfig,
) -> AnnotationReport {
    let connections = document.connections();
    let anchors = AnchorTable::build(graph, document.tolls());
    info!(
        "Routing {} connections ({} strategy{})",
        connections.len(),
        config.strategy,
        if config.parallel { ", parallel" } else { "" }
    );

    let route = |connection: &Connection| {
        attribute_connection(graph, &anchors, connection, config.strategy)
    };
    let (outcomes, aggregator): (Vec<ConnectionOutcome>, WayAggregator) = if config.parallel {
        let outcomes: Vec<_> = connections.par_iter().map(route).collect();
        let aggregator = connections
            .par_iter()
            .zip(outcomes.par_iter())
            .fold(WayAggregator::new, |agg, (connection, outcome)| {
                record(agg, connection, outcome)
            })
            .reduce(WayAggregator::new, WayAggregator::merged);
        (outcomes, aggregator)
    } else {
        let outcomes: Vec<_> = connections.iter().map(route).collect();
        let aggregator = connections
            .iter()
            .zip(&outcomes)
            .fold(WayAggregator::new(), |agg, (connection, outcome)| {
                record(agg, connection, outcome)
            });
        (outcomes, aggregator)
    };

    let mut report = AnnotationReport {
        classes: document.vehicle_classes(),
        ..AnnotationReport::default()
    };
    for (connection, outcome) in connections.iter().zip(&outcomes) {
        report.count(connection, outcome);
        write_outcome(document, connection, outcome);
    }

    document.by_way = Some(summary_records(&aggregator.summary(graph)));
    report.aggregator = aggregator;

    info!(
        "Annotated {}/{} connections ({} unresolved, {} without path, {} without distance)",
        report.annotated,
        report.connections,
        report.unresolved,
        report.no_path,
        report.skipped_no_distance
    );
    if report.broken_steps > 0 {
        warn!("{} path edges could not be matched to a way", report.broken_steps);
    }
    report
}

fn write_outcome(
    document: &mut PricingDocument,
    connection: &Connection,
    outcome: &ConnectionOutcome,
) {
    let Some(payload) = document.payload_mut(connection) else {
        return;
    };
    match outcome {
        Ok(routed) => {
            payload.by_ways = Some(
                routed
                    .walk
                    .unique()
                    .into_iter()
                    .map(|way| Value::String(way.to_string()))
                    .collect(),
            );
            payload.note = None;
            payload.reason = None;
        }
        Err(issue) => {
            debug!("{}: {}", connection.relation, issue.code());
            payload.by_ways = Some(Vec::new());
            payload.note = Some(issue.note().to_string());
            payload.reason = Some(issue.code().to_string());
        }
    }
}

/// Top-level `by_way` block, keyed by way id
pub fn summary_records(summary: &[WaySummary]) -> BTreeMap<WayId, WaySummaryRecord> {
    summary
        .iter()
        .map(|way| {
            let record = WaySummaryRecord {
                length: Value::String(format_fixed(way.length_km, 3)),
                average_price: way
                    .average_price
                    .iter()
                    .map(|(class, price)| {
                        (class.to_string(), Value::String(format_general(*price, 3)))
                    })
                    .collect(),
                relation: way.relations.clone(),
            };
            (way.way, record)
        })
        .collect()
}
