use geoconvert_core::error::ErrorKind;
use geoconvert_core::models::MapView;
use geoconvert_core::{BatchOutput, Direction, GeoPoint, Hemisphere, Table, UtmPoint};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            service: "geoconvert-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Single point converted to UTM
#[derive(Debug, Serialize)]
pub struct ToUtmResponse {
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub easting: f64,
    pub northing: f64,
    pub map: MapView,
}

impl ToUtmResponse {
    pub fn new(point: GeoPoint, utm: UtmPoint) -> Self {
        Self {
            zone: utm.zone().number(),
            hemisphere: utm.hemisphere(),
            easting: utm.easting(),
            northing: utm.northing(),
            map: MapView::single(point),
        }
    }
}

/// Single point converted to decimal degrees
#[derive(Debug, Serialize)]
pub struct ToDecimalResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub map: MapView,
}

impl From<GeoPoint> for ToDecimalResponse {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
            map: MapView::single(point),
        }
    }
}

/// First rows of an uploaded table
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub file_name: String,
    pub total_rows: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One failed batch row; `row` is 1-based
#[derive(Debug, Serialize)]
pub struct RowFailureResponse {
    pub row: usize,
    pub kind: ErrorKind,
    pub error: String,
}

/// Batch conversion result
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub direction: Direction,
    pub total_rows: usize,
    pub converted: usize,
    pub failed: usize,
    pub failures: Vec<RowFailureResponse>,
    pub table: Table,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapView>,
}

impl From<&BatchOutput> for BatchResponse {
    fn from(output: &BatchOutput) -> Self {
        Self {
            direction: output.direction,
            total_rows: output.rows.len(),
            converted: output.success_count(),
            failed: output.failure_count(),
            failures: output
                .failures()
                .map(|(index, error)| RowFailureResponse {
                    row: index + 1,
                    kind: error.kind(),
                    error: error.to_string(),
                })
                .collect(),
            table: output.to_table(),
            map: MapView::for_points(&output.points()),
        }
    }
}
