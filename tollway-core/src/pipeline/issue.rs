use std::fmt;

use crate::routing::{PathResult, WayWalk};

/// Why a connection received no ways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionIssue {
    UnresolvableSource,
    UnresolvableDestination,
    NoPath,
}

impl ConnectionIssue {
    /// Machine readable reason, written to the `_reason` field
    pub fn code(self) -> &'static str {
        match self {
            Self::UnresolvableSource => "unresolvable_source",
            Self::UnresolvableDestination => "unresolvable_destination",
            Self::NoPath => "no_path",
        }
    }

    /// Text written to the `_note` field of the connection
    pub fn note(self) -> &'static str {
        match self {
            Self::UnresolvableSource => "OSM node not found for source toll",
            Self::UnresolvableDestination => "OSM node not found for destination toll",
            Self::NoPath => "No path found between toll OSM nodes",
        }
    }
}

impl fmt::Display for ConnectionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.note())
    }
}

/// Path found for a connection and the ways it travels
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedConnection {
    pub path: PathResult,
    pub walk: WayWalk,
}

pub type ConnectionOutcome = Result<RoutedConnection, ConnectionIssue>;
