use std::collections::BTreeSet;
use std::io::Write;

use crate::{
    Error,
    model::{PricingDocument, VehicleClass},
};

use super::format::format_significant;

/// Writes `way_id,length_km,<class>_mean_per_km...` from the `by_way`
/// block of an annotated document.
///
/// `significant_digits` below two keeps up to ten decimals.
pub fn write_by_way_summary_csv<W: Write>(
    writer: W,
    document: &PricingDocument,
    significant_digits: usize,
) -> Result<usize, Error> {
    let Some(by_way) = &document.by_way else {
        return Err(Error::MissingField("by_way"));
    };

    let classes: Vec<VehicleClass> = document
        .vehicle_classes()
        .into_iter()
        .chain(
            by_way
                .values()
                .flat_map(|record| record.average_price.keys())
                .map(|class| VehicleClass::new(class.as_str())),
        )
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let format = |value: f64| format_significant(value, significant_digits);

    let mut csv = csv::Writer::from_writer(writer);
    let mut header = vec!["way_id".to_string(), "length_km".to_string()];
    header.extend(classes.iter().map(|class| format!("{class}_mean_per_km")));
    csv.write_record(&header)?;

    for (way, record) in by_way {
        let length_km = record.length_km();
        let mut row = vec![way.to_string(), format(length_km)];
        row.extend(classes.iter().map(|class| {
            if length_km > 0.0 {
                format(record.average_price(class.as_str()) / length_km)
            } else {
                format(0.0)
            }
        }));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(by_way.len())
}
