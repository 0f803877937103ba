//! Lenient readers for loosely typed pricing document values

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;

use crate::{OsmNodeId, WayId};

/// Reads a decimal that may be a JSON number or a string using `,` or `.`
/// as decimal separator. Non-finite and unparsable values give `None`.
pub fn parse_decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Reads an OSM node id given as an integer or a numeric string
pub fn parse_node_id(value: &Value) -> Option<OsmNodeId> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<OsmNodeId>().ok(),
        _ => None,
    }
}

/// Text of a scalar value as written in a CSV cell
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Accepts either a single value or an array of values
pub(super) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(values) => values,
        single => vec![single],
    })
}

/// Reads a map keyed by way ids written as JSON object keys
pub(super) fn way_keyed<'de, D, T>(
    deserializer: D,
) -> Result<Option<BTreeMap<WayId, T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let Some(map) = Option::<BTreeMap<String, T>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    map.into_iter()
        .map(|(key, value)| {
            key.trim()
                .parse::<WayId>()
                .map(|way| (way, value))
                .map_err(|_| D::Error::custom(format!("invalid way id `{key}`")))
        })
        .collect::<Result<_, _>>()
        .map(Some)
}
