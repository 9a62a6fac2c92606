//! Downloadable artifacts built from conversion results

pub mod delimited;
pub mod kml;

pub use self::delimited::to_delimited_text;
pub use self::kml::{to_kml, to_kml_with_prefix};

use crate::models::Direction;

/// MIME type of KML documents
pub const KML_MIME: &str = "application/vnd.google-earth.kml+xml";

/// MIME type of delimited text
pub const CSV_MIME: &str = "text/csv";

pub const KML_FILE_NAME: &str = "result.kml";
pub const UTM_CSV_FILE_NAME: &str = "result_utm.csv";
pub const DECIMAL_CSV_FILE_NAME: &str = "result_decimal.csv";

/// Default file name of the delimited export for a direction
pub fn csv_file_name(direction: Direction) -> &'static str {
    match direction {
        Direction::DecimalToUtm => UTM_CSV_FILE_NAME,
        Direction::UtmToDecimal => DECIMAL_CSV_FILE_NAME,
    }
}
