//! Single point conversion between decimal degrees and UTM

use crate::error::{ConversionError, ConversionResult};
use crate::models::{GeoPoint, Hemisphere, UtmPoint, UtmZone};
use crate::ports::ProjectionEngine;

/// Converts single points using a [`ProjectionEngine`].
///
/// Both operations are pure: the same inputs always give the same result.
#[derive(Debug, Clone, Default)]
pub struct PointConverter<E> {
    engine: E,
}

impl<E: ProjectionEngine> PointConverter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Convert decimal latitude/longitude to UTM.
    ///
    /// The zone is derived from the longitude and the hemisphere from the sign
    /// of the latitude.
    pub fn decimal_to_utm(&self, latitude: f64, longitude: f64) -> ConversionResult<UtmPoint> {
        let point = GeoPoint::new(latitude, longitude)?;
        self.point_to_utm(point)
    }

    /// Convert an already validated point to UTM
    pub fn point_to_utm(&self, point: GeoPoint) -> ConversionResult<UtmPoint> {
        let zone = UtmZone::from_longitude(point.longitude());
        let hemisphere = Hemisphere::from_latitude(point.latitude());

        let (easting, northing) = self.engine.forward(zone, hemisphere, point)?;
        if !easting.is_finite() || !northing.is_finite() {
            return Err(ConversionError::projection(format!(
                "no finite projection for {} in zone {}{}",
                point,
                zone,
                hemisphere.letter()
            )));
        }

        tracing::trace!(%point, %zone, ?hemisphere, easting, northing, "Projected to UTM");
        Ok(UtmPoint::new(zone, hemisphere, easting, northing))
    }

    /// Convert UTM coordinates to decimal latitude/longitude
    pub fn utm_to_decimal(
        &self,
        zone: u8,
        easting: f64,
        northing: f64,
        hemisphere: Hemisphere,
    ) -> ConversionResult<GeoPoint> {
        let zone = UtmZone::new(zone)?;
        if !easting.is_finite() || !northing.is_finite() {
            return Err(ConversionError::projection(format!(
                "easting and northing must be finite, got {}, {}",
                easting, northing
            )));
        }

        let (longitude, latitude) = self.engine.inverse(zone, hemisphere, easting, northing)?;
        let point = GeoPoint::new(latitude, longitude).map_err(|e| {
            ConversionError::projection(format!(
                "inverse projection of {}E {}N in zone {}{} is not a valid position: {}",
                easting,
                northing,
                zone,
                hemisphere.letter(),
                e
            ))
        })?;

        tracing::trace!(%zone, ?hemisphere, easting, northing, %point, "Unprojected from UTM");
        Ok(point)
    }
}
