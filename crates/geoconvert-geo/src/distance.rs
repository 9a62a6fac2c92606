//! Geodesic distance on the WGS84 ellipsoid

use geo::{Distance, Geodesic};
use geoconvert_core::GeoPoint;

use crate::models::to_geo_point;

/// Length of the shortest path between two points, in metres
pub fn geodesic_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    Geodesic.distance(to_geo_point(a), to_geo_point(b))
}
