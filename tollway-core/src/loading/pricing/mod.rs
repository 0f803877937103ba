//! Reading and writing the toll pricing document

mod reader;

pub use reader::{parse_pricing_str, read_pricing_document, to_pretty_json, write_pricing_document};
