//! OSM ways and their one-way semantics

use hashbrown::HashMap;

use crate::{OsmNodeId, WayId};

/// Travel directions allowed along a way, relative to its node order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Only in node order
    Forward,
    /// Only against node order
    Reverse,
    Both,
}

impl Direction {
    /// Reads `oneway` and `highway` tags.
    ///
    /// Motorways and motorway links are one-way unless tagged otherwise.
    pub fn from_tags(tags: &HashMap<String, String>) -> Self {
        let oneway = tags
            .get("oneway")
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match oneway.as_str() {
            "yes" | "1" | "true" | "forward" => return Direction::Forward,
            "-1" | "reverse" => return Direction::Reverse,
            "no" | "0" | "false" => return Direction::Both,
            _ => {}
        }

        let highway = tags
            .get("highway")
            .map(|value| value.trim().to_ascii_lowercase());
        match highway.as_deref() {
            Some("motorway" | "motorway_link") => Direction::Forward,
            _ => Direction::Both,
        }
    }

    pub fn allows_forward(self) -> bool {
        matches!(self, Direction::Forward | Direction::Both)
    }

    pub fn allows_reverse(self) -> bool {
        matches!(self, Direction::Reverse | Direction::Both)
    }
}

/// Ordered node references of one physical road segment
#[derive(Debug, Clone)]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<OsmNodeId>,
    pub tags: HashMap<String, String>,
}

impl Way {
    pub fn new(id: WayId, nodes: Vec<OsmNodeId>, tags: HashMap<String, String>) -> Self {
        Self { id, nodes, tags }
    }

    pub fn direction(&self) -> Direction {
        Direction::from_tags(&self.tags)
    }

    /// First and last node are the same
    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 2 && self.nodes.first() == self.nodes.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn explicit_oneway_values() {
        for value in ["yes", "1", "true", "forward", " YES "] {
            assert_eq!(
                Direction::from_tags(&tags(&[("oneway", value)])),
                Direction::Forward,
                "{value}"
            );
        }
        for value in ["-1", "reverse"] {
            assert_eq!(
                Direction::from_tags(&tags(&[("oneway", value)])),
                Direction::Reverse
            );
        }
        for value in ["no", "0", "false"] {
            assert_eq!(
                Direction::from_tags(&tags(&[("oneway", value), ("highway", "motorway")])),
                Direction::Both
            );
        }
    }

    #[test]
    fn motorways_default_to_forward() {
        assert_eq!(
            Direction::from_tags(&tags(&[("highway", "motorway")])),
            Direction::Forward
        );
        assert_eq!(
            Direction::from_tags(&tags(&[("highway", "motorway_link")])),
            Direction::Forward
        );
        assert_eq!(
            Direction::from_tags(&tags(&[("highway", "trunk")])),
            Direction::Both
        );
        assert_eq!(Direction::from_tags(&HashMap::new()), Direction::Both);
    }

    #[test]
    fn unknown_oneway_value_falls_back_to_highway_default() {
        assert_eq!(
            Direction::from_tags(&tags(&[("oneway", "alternating"), ("highway", "motorway")])),
            Direction::Forward
        );
        assert_eq!(
            Direction::from_tags(&tags(&[("oneway", "reversible")])),
            Direction::Both
        );
    }
}
