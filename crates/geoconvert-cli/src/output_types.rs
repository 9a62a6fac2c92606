use geoconvert_core::error::ErrorKind;
use geoconvert_core::models::MapView;
use geoconvert_core::{Direction, Hemisphere, Table};
use serde::Serialize;

/// Output for to-utm command
#[derive(Debug, Serialize)]
pub struct ToUtmOutput {
    pub latitude: f64,
    pub longitude: f64,
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub easting: f64,
    pub northing: f64,
    pub map: MapView,
}

/// Output for to-decimal command
#[derive(Debug, Serialize)]
pub struct ToDecimalOutput {
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub easting: f64,
    pub northing: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub map: MapView,
}

/// Output for batch command
#[derive(Debug, Serialize)]
pub struct BatchCommandOutput {
    pub input: String,
    pub direction: Direction,
    pub total_rows: usize,
    pub converted: usize,
    pub failed: usize,
    pub failures: Vec<RowFailure>,
    pub written: Vec<String>,
    pub map: Option<MapView>,
    pub table: Table,
}

#[derive(Debug, Serialize)]
pub struct RowFailure {
    /// 1-based data row number
    pub row: usize,
    pub kind: ErrorKind,
    pub error: String,
}

/// Output for distance command
#[derive(Debug, Serialize)]
pub struct DistanceOutput {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub meters: f64,
}

/// One configuration entry with its source
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: String,
}
