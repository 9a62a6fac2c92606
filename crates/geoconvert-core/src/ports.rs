//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

use crate::error::ConversionResult;
use crate::models::{GeoPoint, Hemisphere, UtmZone};

/// Port for the geodesy library performing UTM projections on the WGS84
/// ellipsoid.
///
/// Implementations must be shareable between threads; an engine that wraps a
/// non-thread-safe handle should create it per call.
pub trait ProjectionEngine: Send + Sync {
    /// Project a geographic point into the given zone and hemisphere.
    ///
    /// Returns `(easting, northing)` in metres.
    fn forward(
        &self,
        zone: UtmZone,
        hemisphere: Hemisphere,
        point: GeoPoint,
    ) -> ConversionResult<(f64, f64)>;

    /// Unproject planar coordinates of the given zone and hemisphere.
    ///
    /// Returns `(longitude, latitude)` in decimal degrees.
    fn inverse(
        &self,
        zone: UtmZone,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
    ) -> ConversionResult<(f64, f64)>;
}
