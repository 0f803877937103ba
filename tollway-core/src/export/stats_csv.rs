use std::io::Write;

use crate::{
    Error,
    model::{RoadGraph, VehicleClass},
    stats::{Variance, WayAggregator},
};

use super::format::format_fixed;

const STAT_COLUMNS: [&str; 7] = ["count", "sum", "min", "max", "mean", "variance", "mean_per_km"];

pub fn way_stats_header(classes: &[VehicleClass]) -> Vec<String> {
    let mut header = vec!["way_id".to_string(), "length_km".to_string()];
    for class in classes {
        header.extend(STAT_COLUMNS.iter().map(|column| format!("{class}_{column}")));
    }
    header
}

/// Writes the price statistics of every priced way, sorted by way id.
///
/// Returns the number of rows written.
pub fn write_way_stats_csv<W: Write>(
    writer: W,
    aggregator: &WayAggregator,
    graph: &RoadGraph,
    classes: &[VehicleClass],
    variance: Variance,
) -> Result<usize, Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(way_stats_header(classes))?;

    let mut rows = 0;
    for (way, accumulator) in aggregator.iter() {
        if !accumulator.has_priced_class() {
            continue;
        }
        let length_km = graph.way_length_km(way).unwrap_or(0.0);

        let mut record = vec![way.to_string(), format_fixed(length_km, 6)];
        for class in classes {
            match accumulator.class_stats(class).filter(|stats| !stats.is_empty()) {
                Some(stats) => {
                    let mean_per_km = if length_km > 0.0 {
                        stats.mean() / length_km
                    } else {
                        0.0
                    };
                    record.push(stats.count().to_string());
                    record.extend(
                        [
                            stats.sum(),
                            stats.min().unwrap_or(0.0),
                            stats.max().unwrap_or(0.0),
                            stats.mean(),
                            stats.variance(variance),
                            mean_per_km,
                        ]
                        .map(|value| format_fixed(value, 6)),
                    );
                }
                None => {
                    record.push("0".to_string());
                    record.extend(std::iter::repeat_n(format_fixed(0.0, 6), 6));
                }
            }
        }
        csv.write_record(&record)?;
        rows += 1;
    }

    csv.flush()?;
    Ok(rows)
}
