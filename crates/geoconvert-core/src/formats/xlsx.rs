use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

use super::TableReader;
use crate::error::{GeoconvertError, Result};
use crate::models::Table;

const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm"];

/// Excel reader. Only the first worksheet is read; its first row is the header.
#[derive(Debug, Clone, Default)]
pub struct XlsxReader;

impl XlsxReader {
    pub fn new() -> Self {
        Self
    }
}

impl TableReader for XlsxReader {
    fn read(&self, path: &Path) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| format_error(format!("Failed to open spreadsheet: {}", e)))?;
        let range = first_sheet(&mut workbook)?;
        range_to_table(&range)
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| format_error(format!("Failed to open spreadsheet: {}", e)))?;
        let range = first_sheet(&mut workbook)?;
        range_to_table(&range)
    }

    fn supported_extensions(&self) -> &[&str] {
        SUPPORTED_EXTENSIONS
    }

    fn format_name(&self) -> &str {
        "Excel"
    }
}

fn format_error(message: String) -> GeoconvertError {
    GeoconvertError::FormatError {
        format: "Excel".to_string(),
        message,
    }
}

fn first_sheet<RS, R>(workbook: &mut R) -> Result<Range<Data>>
where
    RS: std::io::Read + std::io::Seek,
    R: Reader<RS>,
{
    let name = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or_else(|| format_error("Workbook has no sheets".to_string()))?;

    tracing::debug!(sheet = %name, "Reading first worksheet");
    workbook
        .worksheet_range(&name)
        .map_err(|e| format_error(format!("Failed to read sheet '{}': {:?}", name, e)))
}

fn range_to_table(range: &Range<Data>) -> Result<Table> {
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| format_error("Sheet is empty".to_string()))?
        .iter()
        .map(|c| cell_to_string(c).trim().to_string())
        .collect();

    let rows = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Integral numbers such as zone 36 are stored as 36.0
            if f.fract() == 0.0 {
                format!("{f:.0}")
            } else {
                format!("{f}")
            }
        }
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_owned(),
        Data::DateTime(dt) => format!("{dt}"),
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(36.0)), "36");
        assert_eq!(cell_to_string(&Data::Float(-25.0143)), "-25.0143");
        assert_eq!(cell_to_string(&Data::Int(754128)), "754128");
        assert_eq!(cell_to_string(&Data::String("Beira".to_string())), "Beira");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn test_range_to_table() {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("Zona".to_string()));
        range.set_value((0, 1), Data::String("E".to_string()));
        range.set_value((0, 2), Data::String("N".to_string()));
        range.set_value((1, 0), Data::Float(36.0));
        range.set_value((1, 1), Data::Float(754128.25));
        range.set_value((1, 2), Data::Float(6947467.0));
        range.set_value((2, 0), Data::Int(37));

        let table = range_to_table(&range).unwrap();

        assert_eq!(table.headers, vec!["Zona", "E", "N"]);
        assert_eq!(table.rows[0], vec!["36", "754128.25", "6947467"]);
        assert_eq!(table.rows[1], vec!["37", "", ""]);
    }

    #[test]
    fn test_empty_sheet_is_format_error() {
        let range: Range<Data> = Range::empty();
        let err = range_to_table(&range).unwrap_err();
        assert!(matches!(err, GeoconvertError::FormatError { .. }));
    }

    #[test]
    fn test_garbage_bytes_are_format_error() {
        let err = XlsxReader::new().read_bytes(b"not a zip archive").unwrap_err();
        assert!(matches!(err, GeoconvertError::FormatError { .. }));
    }
}
