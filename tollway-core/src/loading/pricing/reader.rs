use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::{Error, model::PricingDocument};

/// Parses a pricing document.
///
/// # Errors
///
/// Returns an error if the text is not JSON, the top level is not an
/// object or `toll_description` is missing.
pub fn parse_pricing_str(text: &str) -> Result<PricingDocument, Error> {
    let value: Value = serde_json::from_str(text)?;
    document_from_value(value)
}

/// Reads a pricing document from disk
///
/// # Errors
///
/// Same as [`parse_pricing_str`], plus I/O errors
pub fn read_pricing_document(path: &Path) -> Result<PricingDocument, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let document = document_from_value(value)?;

    info!(
        "Loaded pricing document {}: {} tolls, {} networks, {} connections",
        path.display(),
        document.toll_description.len(),
        document.networks.len(),
        document.connection_count()
    );
    Ok(document)
}

fn document_from_value(value: Value) -> Result<PricingDocument, Error> {
    let Some(object) = value.as_object() else {
        return Err(Error::InvalidData(
            "pricing document must be a JSON object".to_string(),
        ));
    };
    if !object.contains_key("toll_description") {
        return Err(Error::MissingField("toll_description"));
    }
    if !object.contains_key("networks") {
        warn!("Pricing document has no `networks`, nothing to attribute");
    }

    let document: PricingDocument = serde_json::from_value(value)?;
    if document.date.is_some() && document.issued_on().is_none() {
        warn!(
            "Unrecognized document date {:?}",
            document.date.as_deref().unwrap_or_default()
        );
    }
    Ok(document)
}

/// Serializes with a four space indentation
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes the document as indented UTF-8 JSON
///
/// # Errors
///
/// Returns an error if the file can not be written
pub fn write_pricing_document(path: &Path, document: &PricingDocument) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&to_pretty_json(document)?)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_toll_description_is_structural() {
        assert!(matches!(
            parse_pricing_str(r#"{ "networks": [] }"#),
            Err(Error::MissingField("toll_description"))
        ));
        assert!(matches!(
            parse_pricing_str("[]"),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn minimal_document() {
        let document = parse_pricing_str(r#"{ "toll_description": {} }"#).unwrap();
        assert!(document.networks.is_empty());
        assert_eq!(document.connection_count(), 0);
    }

    #[test]
    fn pretty_json_keeps_non_ascii() {
        let document =
            parse_pricing_str(r#"{ "toll_description": { "SAINT-ÉTIENNE": {} } }"#).unwrap();
        let text = String::from_utf8(to_pretty_json(&document).unwrap()).unwrap();
        assert!(text.contains("SAINT-ÉTIENNE"));
        assert!(text.contains("\n    \"toll_description\""));
    }
}
