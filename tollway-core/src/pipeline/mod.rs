//! End-to-end attribution of a pricing document

mod annotate;
mod config;
mod issue;

pub use annotate::{AnnotationReport, annotate, attribute_connection, summary_records};
pub use config::AttributionConfig;
pub use issue::{ConnectionIssue, ConnectionOutcome, RoutedConnection};
