//! Row-wise conversion of tabular data
//!
//! Every row is converted independently: a row that cannot be parsed or
//! converted is marked as an error and the batch carries on. Only problems
//! that concern the whole table (a mapped column missing from the header)
//! abort the batch.

use serde::Serialize;

use crate::convert::PointConverter;
use crate::error::{ConversionError, ConversionResult, GeoconvertError, Result};
use crate::models::{Direction, GeoPoint, Hemisphere, Table, UtmPoint, UtmZone};
use crate::ports::ProjectionEngine;

/// Marker written in every result column of a failed row
pub const ERROR_MARKER: &str = "Error";

/// Result columns appended for decimal to UTM conversion
pub const UTM_RESULT_COLUMNS: [&str; 4] = ["Zone", "Hemisphere", "Easting", "Northing"];

/// Result columns appended for UTM to decimal conversion
pub const DECIMAL_RESULT_COLUMNS: [&str; 2] = ["Latitude", "Longitude"];

/// Which columns hold the coordinates. The variant also selects the
/// conversion direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum ColumnMapping {
    /// Decimal degrees in, UTM out
    Decimal { latitude: String, longitude: String },
    /// UTM in, decimal degrees out. The hemisphere applies to every row.
    Utm {
        zone: String,
        easting: String,
        northing: String,
        hemisphere: Hemisphere,
    },
}

impl ColumnMapping {
    pub fn direction(&self) -> Direction {
        match self {
            ColumnMapping::Decimal { .. } => Direction::DecimalToUtm,
            ColumnMapping::Utm { .. } => Direction::UtmToDecimal,
        }
    }

    fn column_names(&self) -> Vec<&str> {
        match self {
            ColumnMapping::Decimal { latitude, longitude } => vec![latitude, longitude],
            ColumnMapping::Utm {
                zone,
                easting,
                northing,
                ..
            } => vec![zone, easting, northing],
        }
    }

    /// Check that every mapped column exists in the header
    pub fn validate(&self, headers: &[String]) -> Result<()> {
        for column in self.column_names() {
            if !headers.iter().any(|h| h == column) {
                return Err(GeoconvertError::ColumnNotFound {
                    column: column.to_string(),
                    available: headers.join(", "),
                });
            }
        }
        Ok(())
    }
}

/// Both sides of a successful row conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvertedPoint {
    pub location: GeoPoint,
    pub utm: UtmPoint,
}

/// One input row with its conversion result
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    /// Zero-based position in the input table
    pub index: usize,
    /// Original cells, untouched
    pub values: Vec<String>,
    pub result: ConversionResult<ConvertedPoint>,
}

impl BatchRow {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Cells for the appended result columns
    pub fn result_values(&self, direction: Direction) -> Vec<String> {
        match (&self.result, direction) {
            (Ok(converted), Direction::DecimalToUtm) => vec![
                converted.utm.zone().to_string(),
                converted.utm.hemisphere().letter().to_string(),
                converted.utm.easting().to_string(),
                converted.utm.northing().to_string(),
            ],
            (Ok(converted), Direction::UtmToDecimal) => vec![
                converted.location.latitude().to_string(),
                converted.location.longitude().to_string(),
            ],
            (Err(_), direction) => {
                vec![ERROR_MARKER.to_string(); result_columns(direction).len()]
            }
        }
    }
}

/// Names of the columns appended for a direction
pub fn result_columns(direction: Direction) -> &'static [&'static str] {
    match direction {
        Direction::DecimalToUtm => &UTM_RESULT_COLUMNS,
        Direction::UtmToDecimal => &DECIMAL_RESULT_COLUMNS,
    }
}

/// Outcome of a batch: one [`BatchRow`] per input row, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    pub direction: Direction,
    pub headers: Vec<String>,
    pub rows: Vec<BatchRow>,
}

impl BatchOutput {
    pub fn success_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.rows.len() - self.success_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.rows.iter().all(BatchRow::is_ok)
    }

    /// Failed rows with their errors
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ConversionError)> {
        self.rows.iter().filter_map(|r| r.result.as_ref().err().map(|e| (r.index, e)))
    }

    /// Geographic positions of the successful rows, in row order
    pub fn points(&self) -> Vec<GeoPoint> {
        self.rows
            .iter()
            .filter_map(|r| r.result.as_ref().ok().map(|c| c.location))
            .collect()
    }

    /// Cells per row before the result columns: the header width, or the
    /// longest row when some rows carry extra cells
    fn value_width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.values.len())
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    /// Original headers followed by the result columns. Extra cells of
    /// over-long rows get unnamed columns.
    pub fn augmented_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        headers.resize(self.value_width(), String::new());
        headers.extend(result_columns(self.direction).iter().map(|c| c.to_string()));
        headers
    }

    /// The input table with the result columns appended.
    ///
    /// Rows are padded with empty cells to a common width so that result
    /// columns always line up under their headers.
    pub fn to_table(&self) -> Table {
        let width = self.value_width();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = row.values.clone();
                cells.resize(width, String::new());
                cells.extend(row.result_values(self.direction));
                cells
            })
            .collect();
        Table::new(self.augmented_headers(), rows)
    }
}

/// Applies a [`PointConverter`] to every row of a table
pub struct BatchProcessor<'a, E> {
    converter: &'a PointConverter<E>,
}

impl<'a, E: ProjectionEngine> BatchProcessor<'a, E> {
    pub fn new(converter: &'a PointConverter<E>) -> Self {
        Self { converter }
    }

    /// Convert every row of `table` according to `mapping`
    pub fn process(&self, table: &Table, mapping: &ColumnMapping) -> Result<BatchOutput> {
        self.process_with_progress(table, mapping, |_| {})
    }

    /// Like [`process`](Self::process), calling `on_row` after each row
    pub fn process_with_progress<F>(
        &self,
        table: &Table,
        mapping: &ColumnMapping,
        mut on_row: F,
    ) -> Result<BatchOutput>
    where
        F: FnMut(&BatchRow),
    {
        mapping.validate(&table.headers)?;
        let direction = mapping.direction();

        let mut rows = Vec::with_capacity(table.row_count());
        for (index, values) in table.rows.iter().enumerate() {
            let result = self.convert_row(table, values, mapping);
            if let Err(e) = &result {
                tracing::debug!(row = index, error = %e, "Row conversion failed");
            }
            let row = BatchRow {
                index,
                values: values.clone(),
                result,
            };
            on_row(&row);
            rows.push(row);
        }

        let output = BatchOutput {
            direction,
            headers: table.headers.clone(),
            rows,
        };

        tracing::info!(
            ?direction,
            rows = output.rows.len(),
            converted = output.success_count(),
            failed = output.failure_count(),
            "Batch conversion finished"
        );

        Ok(output)
    }

    fn convert_row(
        &self,
        table: &Table,
        values: &[String],
        mapping: &ColumnMapping,
    ) -> ConversionResult<ConvertedPoint> {
        match mapping {
            ColumnMapping::Decimal { latitude, longitude } => {
                let lat = parse_float(cell(table, values, latitude)?, latitude)?;
                let lon = parse_float(cell(table, values, longitude)?, longitude)?;
                let location = GeoPoint::new(lat, lon)?;
                let utm = self.converter.point_to_utm(location)?;
                Ok(ConvertedPoint { location, utm })
            }
            ColumnMapping::Utm {
                zone,
                easting,
                northing,
                hemisphere,
            } => {
                let zone = parse_zone(cell(table, values, zone)?, zone)?;
                let e = parse_float(cell(table, values, easting)?, easting)?;
                let n = parse_float(cell(table, values, northing)?, northing)?;
                let location = self.converter.utm_to_decimal(zone.number(), e, n, *hemisphere)?;
                let utm = UtmPoint::new(zone, *hemisphere, e, n);
                Ok(ConvertedPoint { location, utm })
            }
        }
    }
}

/// Value of `column` in a row; columns were validated against the header
fn cell<'v>(table: &Table, values: &'v [String], column: &str) -> ConversionResult<&'v str> {
    table
        .column_index(column)
        .and_then(|i| values.get(i))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConversionError::MissingColumn {
            column: column.to_string(),
        })
}

fn parse_float(value: &str, column: &str) -> ConversionResult<f64> {
    value.parse::<f64>().map_err(|_| ConversionError::Parse {
        column: column.to_string(),
        value: value.to_string(),
        expected: "a decimal number",
    })
}

/// Zone numbers may arrive as `36` or, from spreadsheets, as `36.0`.
/// Numbers outside [1, 60] are validation errors whatever their size.
fn parse_zone(value: &str, column: &str) -> ConversionResult<UtmZone> {
    let parse_error = || ConversionError::Parse {
        column: column.to_string(),
        value: value.to_string(),
        expected: "a zone number",
    };

    let number = match value.parse::<i64>() {
        Ok(number) => number,
        Err(_) => {
            let float = value.parse::<f64>().map_err(|_| parse_error())?;
            if !float.is_finite() || float.fract() != 0.0 {
                return Err(parse_error());
            }
            // Saturates for magnitudes beyond i64, which are out of range anyway
            float as i64
        }
    };

    UtmZone::from_number(number)
}
