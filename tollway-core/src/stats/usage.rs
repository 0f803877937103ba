use hashbrown::HashMap;

use crate::WayId;

/// Kilometers travelled on each way by one connection, in first-use order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayUsage {
    entries: Vec<(WayId, f64)>,
    positions: HashMap<WayId, usize>,
}

impl WayUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, way: WayId, km: f64) {
        match self.positions.get(&way) {
            Some(&pos) => self.entries[pos].1 += km,
            None => {
                self.positions.insert(way, self.entries.len());
                self.entries.push((way, km));
            }
        }
    }

    pub fn get(&self, way: WayId) -> Option<f64> {
        self.positions.get(&way).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WayId, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_km(&self) -> f64 {
        self.entries.iter().map(|(_, km)| km).sum()
    }
}

impl FromIterator<(WayId, f64)> for WayUsage {
    fn from_iter<T: IntoIterator<Item = (WayId, f64)>>(iter: T) -> Self {
        let mut usage = Self::new();
        for (way, km) in iter {
            usage.add(way, km);
        }
        usage
    }
}
