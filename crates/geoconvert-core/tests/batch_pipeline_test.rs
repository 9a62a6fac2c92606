//! End-to-end batch pipeline: read a table file, convert every row, export
//! the results.

use geoconvert_core::export::{csv_file_name, to_delimited_text, to_kml, UTM_CSV_FILE_NAME};
use geoconvert_core::formats::{CsvReader, FormatRegistry, TableReader};
use geoconvert_core::ports::ProjectionEngine;
use geoconvert_core::{
    BatchProcessor, ColumnMapping, ConversionError, ConversionResult, Direction, GeoPoint,
    GeoconvertError, Hemisphere, PointConverter, UtmZone,
};
use std::io::Write;
use tempfile::Builder;

/// Equirectangular stand-in for the PROJ adapter
struct PlateCarree;

impl ProjectionEngine for PlateCarree {
    fn forward(
        &self,
        zone: UtmZone,
        hemisphere: Hemisphere,
        point: GeoPoint,
    ) -> ConversionResult<(f64, f64)> {
        let offset = if hemisphere == Hemisphere::South { 10_000_000.0 } else { 0.0 };
        Ok((
            500_000.0 + (point.longitude() - zone.central_meridian()) * 100_000.0,
            point.latitude() * 100_000.0 + offset,
        ))
    }

    fn inverse(
        &self,
        zone: UtmZone,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
    ) -> ConversionResult<(f64, f64)> {
        if easting <= 0.0 {
            return Err(ConversionError::projection("easting must be positive"));
        }
        let offset = if hemisphere == Hemisphere::South { 10_000_000.0 } else { 0.0 };
        Ok((
            zone.central_meridian() + (easting - 500_000.0) / 100_000.0,
            (northing - offset) / 100_000.0,
        ))
    }
}

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_decimal_file_to_kml_and_csv() {
    let file = csv_file(
        "Furo,Latitude,Longitude\n\
         F1,-25.9692,32.5732\n\
         F2,abc,34.8389\n\
         F3,-19.8436,34.8389\n",
    );

    let registry = FormatRegistry::with_defaults(b',');
    let table = registry.read(file.path()).unwrap();
    assert_eq!(table.row_count(), 3);

    let converter = PointConverter::new(PlateCarree);
    let mapping = ColumnMapping::Decimal {
        latitude: "Latitude".to_string(),
        longitude: "Longitude".to_string(),
    };
    let output = BatchProcessor::new(&converter).process(&table, &mapping).unwrap();

    assert_eq!(output.direction, Direction::DecimalToUtm);
    assert_eq!(output.success_count(), 2);
    assert_eq!(output.failure_count(), 1);
    assert!(!output.all_succeeded());

    let kml = to_kml(&output.points()).unwrap();
    assert!(kml.contains("Point 1"));
    assert!(kml.contains("Point 2"));
    assert!(!kml.contains("Point 3"));

    let augmented = output.to_table();
    let text = to_delimited_text(&augmented, b';').unwrap();
    assert!(text.starts_with("Furo;Latitude;Longitude;Zone;Hemisphere;Easting;Northing"));
    assert!(text.contains("F2;abc;34.8389;Error;Error;Error;Error"));

    let reparsed = CsvReader::new(b';').read_bytes(text.as_bytes()).unwrap();
    assert_eq!(reparsed, augmented);
    assert_eq!(csv_file_name(output.direction), UTM_CSV_FILE_NAME);
}

#[test]
fn test_utm_file_with_semicolons() {
    let reader = CsvReader::new(b';');
    let table = reader
        .read_bytes(b"Zona;Este;Norte\n36;533000;7410000\n36.0;-1;7410000\n;533000;7410000\n")
        .unwrap();

    let converter = PointConverter::new(PlateCarree);
    let mapping = ColumnMapping::Utm {
        zone: "Zona".to_string(),
        easting: "Este".to_string(),
        northing: "Norte".to_string(),
        hemisphere: Hemisphere::South,
    };
    let output = BatchProcessor::new(&converter).process(&table, &mapping).unwrap();

    assert_eq!(output.rows.len(), 3);
    assert!(output.rows[0].is_ok());
    assert!(matches!(output.rows[1].result, Err(ConversionError::Projection { .. })));
    assert!(matches!(output.rows[2].result, Err(ConversionError::MissingColumn { .. })));

    let failures: Vec<usize> = output.failures().map(|(i, _)| i).collect();
    assert_eq!(failures, vec![1, 2]);
}

#[test]
fn test_unknown_column_is_fatal() {
    let table = CsvReader::default().read_bytes(b"lat,lng\n1,2\n").unwrap();
    let converter = PointConverter::new(PlateCarree);
    let mapping = ColumnMapping::Decimal {
        latitude: "lat".to_string(),
        longitude: "lon".to_string(),
    };

    let err = BatchProcessor::new(&converter).process(&table, &mapping).unwrap_err();
    match err {
        GeoconvertError::ColumnNotFound { column, available } => {
            assert_eq!(column, "lon");
            assert_eq!(available, "lat, lng");
        }
        other => panic!("Expected ColumnNotFound, got {:?}", other),
    }
}
