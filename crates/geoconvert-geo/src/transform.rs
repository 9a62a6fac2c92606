//! UTM projection through PROJ

use geoconvert_core::error::{ConversionError, ConversionResult};
use geoconvert_core::models::{GeoPoint, Hemisphere, UtmZone};
use geoconvert_core::ports::ProjectionEngine;
use proj::Proj;

/// Geographic WGS84
const WGS84: &str = "EPSG:4326";

/// EPSG code of a WGS84 UTM zone: 326xx north, 327xx south
pub fn utm_epsg(zone: UtmZone, hemisphere: Hemisphere) -> u32 {
    let base = match hemisphere {
        Hemisphere::North => 32600,
        Hemisphere::South => 32700,
    };
    base + u32::from(zone.number())
}

/// [`ProjectionEngine`] backed by PROJ.
///
/// PROJ handles are not thread-safe, so a transformation is created per call
/// and the engine itself holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjEngine;

impl ProjEngine {
    pub fn new() -> Self {
        Self
    }

    fn transformation(from: &str, to: &str) -> ConversionResult<Proj> {
        Proj::new_known_crs(from, to, None).map_err(|e| {
            ConversionError::projection(format!(
                "Failed to create projection from {} to {}: {}",
                from, to, e
            ))
        })
    }
}

impl ProjectionEngine for ProjEngine {
    fn forward(
        &self,
        zone: UtmZone,
        hemisphere: Hemisphere,
        point: GeoPoint,
    ) -> ConversionResult<(f64, f64)> {
        let target = format!("EPSG:{}", utm_epsg(zone, hemisphere));
        let proj = Self::transformation(WGS84, &target)?;

        // Known CRS transformations are normalized to longitude/latitude order
        proj.convert((point.longitude(), point.latitude()))
            .map_err(|e| ConversionError::projection(format!("Projection to {} failed: {}", target, e)))
    }

    fn inverse(
        &self,
        zone: UtmZone,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
    ) -> ConversionResult<(f64, f64)> {
        let source = format!("EPSG:{}", utm_epsg(zone, hemisphere));
        let proj = Self::transformation(&source, WGS84)?;

        proj.convert((easting, northing)).map_err(|e| {
            ConversionError::projection(format!("Projection from {} failed: {}", source, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_epsg() {
        let zone = UtmZone::new(36).unwrap();
        assert_eq!(utm_epsg(zone, Hemisphere::South), 32736);
        assert_eq!(utm_epsg(zone, Hemisphere::North), 32636);
        assert_eq!(utm_epsg(UtmZone::new(1).unwrap(), Hemisphere::North), 32601);
        assert_eq!(utm_epsg(UtmZone::new(60).unwrap(), Hemisphere::South), 32760);
    }

    #[test]
    fn test_forward_central_meridian_at_equator() {
        let zone = UtmZone::new(31).unwrap();
        let point = GeoPoint::new(0.0, 3.0).unwrap();
        let (easting, northing) = ProjEngine.forward(zone, Hemisphere::North, point).unwrap();
        assert!((easting - 500_000.0).abs() < 1e-3);
        assert!(northing.abs() < 1e-3);
    }
}
