use std::collections::HashMap;

use kml::types::{Geometry, Placemark, Point};
use kml::{Kml, KmlDocument, KmlWriter};

use crate::error::{GeoconvertError, Result};
use crate::models::GeoPoint;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const DEFAULT_PLACEMARK_PREFIX: &str = "Point";

/// Build a KML 2.2 document with one placemark per point, named
/// `Point 1`, `Point 2`, ...
pub fn to_kml(points: &[GeoPoint]) -> Result<String> {
    to_kml_with_prefix(points, DEFAULT_PLACEMARK_PREFIX)
}

/// Like [`to_kml`] with a custom placemark name prefix
pub fn to_kml_with_prefix(points: &[GeoPoint], prefix: &str) -> Result<String> {
    let placemarks = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            Kml::Placemark(Placemark {
                name: Some(format!("{} {}", prefix, i + 1)),
                // KML coordinates are longitude first
                geometry: Some(Geometry::Point(Point::new(
                    point.longitude(),
                    point.latitude(),
                    None,
                ))),
                ..Default::default()
            })
        })
        .collect();

    let document = Kml::KmlDocument(KmlDocument {
        attrs: HashMap::from([("xmlns".to_string(), KML_NAMESPACE.to_string())]),
        elements: vec![Kml::Document {
            attrs: HashMap::new(),
            elements: placemarks,
        }],
        ..Default::default()
    });

    let mut buf = Vec::new();
    KmlWriter::from_writer(&mut buf)
        .write(&document)
        .map_err(|e| export_error(e.to_string()))?;

    let body = String::from_utf8(buf).map_err(|e| export_error(e.to_string()))?;

    tracing::debug!(placemarks = points.len(), "Built KML document");

    if body.trim_start().starts_with("<?xml") {
        Ok(body)
    } else {
        Ok(format!("{}\n{}", XML_DECLARATION, body))
    }
}

fn export_error(message: String) -> GeoconvertError {
    GeoconvertError::Export {
        format: "KML".to_string(),
        message,
    }
}
