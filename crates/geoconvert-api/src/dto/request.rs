use std::str::FromStr;

use geoconvert_core::{ColumnMapping, Direction, Hemisphere};
use serde::Deserialize;

use crate::error::ApiError;

/// Decimal degrees to UTM request body
#[derive(Debug, Deserialize)]
pub struct ToUtmRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// UTM to decimal degrees request body.
/// Falls back to the configured hemisphere when none is given. The zone is
/// read as a wide integer so that any out-of-range number is reported as a
/// validation error.
#[derive(Debug, Deserialize)]
pub struct ToDecimalRequest {
    pub zone: i64,
    pub easting: f64,
    pub northing: f64,
    pub hemisphere: Option<Hemisphere>,
}

/// Representation of a batch result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Kml,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "kml" => Ok(ExportFormat::Kml),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ApiError::bad_request("Invalid format")
                .with_details(format!("'{}' is not one of json, kml, csv", other))),
        }
    }
}

/// Uploaded file of a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Extension of the uploaded file name, used to pick a reader
    pub fn extension(&self) -> &str {
        self.name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
    }
}

/// Fields of a batch conversion form
#[derive(Debug, Clone, Default)]
pub struct BatchForm {
    pub file: Option<UploadedFile>,
    pub direction: Option<String>,
    pub lat_col: Option<String>,
    pub lon_col: Option<String>,
    pub zone_col: Option<String>,
    pub easting_col: Option<String>,
    pub northing_col: Option<String>,
    pub hemisphere: Option<String>,
    pub format: Option<String>,
}

impl BatchForm {
    /// Store a text field; unknown names are ignored
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "direction" => &mut self.direction,
            "lat_col" => &mut self.lat_col,
            "lon_col" => &mut self.lon_col,
            "zone_col" => &mut self.zone_col,
            "easting_col" => &mut self.easting_col,
            "northing_col" => &mut self.northing_col,
            "hemisphere" => &mut self.hemisphere,
            "format" => &mut self.format,
            _ => {
                tracing::debug!(field = name, "Ignoring unknown form field");
                return;
            }
        };
        *slot = Some(value);
    }

    pub fn take_file(&mut self) -> Result<UploadedFile, ApiError> {
        self.file.take().ok_or_else(|| {
            ApiError::bad_request("No file provided")
                .with_details("Expected a 'file' field in the multipart form")
        })
    }

    pub fn direction(&self) -> Result<Direction, ApiError> {
        let value = required(&self.direction, "direction")?;
        Ok(Direction::from_str(value)?)
    }

    pub fn export_format(&self) -> Result<ExportFormat, ApiError> {
        self.format
            .as_deref()
            .map(ExportFormat::from_str)
            .unwrap_or(Ok(ExportFormat::default()))
    }

    /// Column mapping for the requested direction. `default_hemisphere`
    /// applies when the form has no `hemisphere` field.
    pub fn mapping(&self, default_hemisphere: Hemisphere) -> Result<ColumnMapping, ApiError> {
        match self.direction()? {
            Direction::DecimalToUtm => Ok(ColumnMapping::Decimal {
                latitude: required(&self.lat_col, "lat_col")?.to_string(),
                longitude: required(&self.lon_col, "lon_col")?.to_string(),
            }),
            Direction::UtmToDecimal => {
                let hemisphere = match self.hemisphere.as_deref() {
                    Some(value) => parse_hemisphere(value)?,
                    None => default_hemisphere,
                };
                Ok(ColumnMapping::Utm {
                    zone: required(&self.zone_col, "zone_col")?.to_string(),
                    easting: required(&self.easting_col, "easting_col")?.to_string(),
                    northing: required(&self.northing_col, "northing_col")?.to_string(),
                    hemisphere,
                })
            }
        }
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::bad_request("Missing form field")
            .with_details(format!("Expected a '{}' field in the multipart form", field))),
    }
}

fn parse_hemisphere(value: &str) -> Result<Hemisphere, ApiError> {
    value
        .parse::<Hemisphere>()
        .map_err(|e| ApiError::bad_request("Invalid hemisphere").with_details(e.to_string()))
}
