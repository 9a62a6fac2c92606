//! Conversions between core coordinate types and the `geo` crate.

use geoconvert_core::GeoPoint;

/// `geo` points are `x = longitude`, `y = latitude`
pub fn to_geo_point(point: GeoPoint) -> geo::Point<f64> {
    geo::Point::new(point.longitude(), point.latitude())
}
