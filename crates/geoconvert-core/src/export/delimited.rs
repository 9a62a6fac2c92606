use csv::WriterBuilder;

use crate::error::{GeoconvertError, Result};
use crate::models::Table;

/// Render a table as delimited text, header first.
///
/// Cells containing the delimiter, quotes or line breaks are quoted, so reading
/// the output back with the same delimiter yields the same table.
pub fn to_delimited_text(table: &Table, delimiter: u8) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&table.headers).map_err(export_error)?;
    for row in &table.rows {
        writer.write_record(row).map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| GeoconvertError::Export {
        format: "CSV".to_string(),
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| GeoconvertError::Export {
        format: "CSV".to_string(),
        message: e.to_string(),
    })
}

fn export_error(e: csv::Error) -> GeoconvertError {
    GeoconvertError::Export {
        format: "CSV".to_string(),
        message: e.to_string(),
    }
}
