//! Great-circle distances on a spherical Earth

use geo::Point;

use crate::EARTH_RADIUS_M;

/// Haversine distance in meters between two WGS84 coordinates.
///
/// Non-finite inputs are not validated and propagate to the result.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

/// Same as [`distance_m`] for `geo` points (x = longitude, y = latitude)
pub fn point_distance_m(a: Point<f64>, b: Point<f64>) -> f64 {
    distance_m(a.y(), a.x(), b.y(), b.x())
}
