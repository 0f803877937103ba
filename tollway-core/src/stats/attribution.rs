//! Apportioning a connection price to the ways it uses

use super::WayUsage;
use crate::{
    WayId,
    model::{ClassPrices, VehicleClass},
};

/// Share of one class price carried by one way
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub way: WayId,
    pub class: VehicleClass,
    pub amount: f64,
}

/// Splits every positive class price over the ways of a connection.
///
/// A way carries `used_km * price / declared_km`. The base is the declared
/// tariff distance, not the travelled length, so shares only add up to the
/// full price when both lengths agree. Nothing is apportioned without a
/// positive declared distance.
pub fn apportion(usage: &WayUsage, prices: &ClassPrices, declared_km: f64) -> Vec<Contribution> {
    if !(declared_km.is_finite() && declared_km > 0.0) {
        return Vec::new();
    }

    usage
        .iter()
        .flat_map(|(way, used_km)| {
            prices
                .iter()
                .filter(|(_, price)| **price > 0.0)
                .map(move |(class, price)| Contribution {
                    way,
                    class: class.clone(),
                    amount: used_km * (price / declared_km),
                })
        })
        .collect()
}
