use std::io::Write;

use itertools::Itertools;

use crate::{
    Error,
    model::{PricingDocument, VehicleClass, pricing::de::value_to_cell},
};

/// Writes one `;` separated row per connection with the ways it travels.
///
/// Distance and prices are copied as written in the document; missing
/// values stay empty.
pub fn write_connections_csv<W: Write>(
    writer: W,
    document: &PricingDocument,
    classes: &[VehicleClass],
) -> Result<usize, Error> {
    let mut csv = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    let mut header = vec![
        "name_from".to_string(),
        "name_to".to_string(),
        "by_way".to_string(),
        "distance".to_string(),
    ];
    header.extend(classes.iter().map(ToString::to_string));
    csv.write_record(&header)?;

    let mut rows = 0;
    for connection in document.connections() {
        let payload = document.payload(&connection);
        let ways = payload
            .map(|payload| payload.way_ids().iter().join(","))
            .unwrap_or_default();

        let mut record = vec![
            connection.relation.from.clone(),
            connection.relation.to.clone(),
            ways,
            payload
                .and_then(|payload| payload.distance.as_ref())
                .map(value_to_cell)
                .unwrap_or_default(),
        ];
        record.extend(classes.iter().map(|class| {
            payload
                .and_then(|payload| payload.price.get(class.as_str()))
                .map(value_to_cell)
                .unwrap_or_default()
        }));
        csv.write_record(&record)?;
        rows += 1;
    }

    csv.flush()?;
    Ok(rows)
}
