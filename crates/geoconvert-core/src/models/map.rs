//! Renderable map description handed to front-ends

use serde::Serialize;

use super::GeoPoint;

/// Zoom level used when showing a single converted point
pub const SINGLE_POINT_ZOOM: u8 = 15;

/// Zoom level used when showing a batch of points
pub const BATCH_ZOOM: u8 = 10;

/// Radius of the highlight circle drawn around a single point, in metres
pub const HIGHLIGHT_RADIUS_M: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: String,
}

impl MapMarker {
    pub fn at(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
            popup: format!("Lat: {:.6}, Lon: {:.6}", point.latitude(), point.longitude()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_radius_m: Option<f64>,
}

impl MapView {
    /// Close-up of one point with a highlight circle
    pub fn single(point: GeoPoint) -> Self {
        Self {
            center: point,
            zoom: SINGLE_POINT_ZOOM,
            markers: vec![MapMarker::at(point)],
            highlight_radius_m: Some(HIGHLIGHT_RADIUS_M),
        }
    }

    /// Overview of many points centered on the first one.
    /// Returns `None` when there is nothing to show.
    pub fn for_points(points: &[GeoPoint]) -> Option<Self> {
        let center = *points.first()?;
        Some(Self {
            center,
            zoom: BATCH_ZOOM,
            markers: points.iter().copied().map(MapMarker::at).collect(),
            highlight_radius_m: None,
        })
    }
}
