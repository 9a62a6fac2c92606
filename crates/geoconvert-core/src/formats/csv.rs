use csv::ReaderBuilder;

use super::TableReader;
use crate::error::{GeoconvertError, Result};
use crate::models::Table;

/// Delimited text reader. Rows may have fewer or more cells than the header.
#[derive(Debug, Clone)]
pub struct CsvReader {
    delimiter: u8,
}

impl CsvReader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn format_error(message: impl Into<String>) -> GeoconvertError {
        GeoconvertError::FormatError {
            format: "CSV".to_string(),
            message: message.into(),
        }
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl TableReader for CsvReader {
    fn read_bytes(&self, bytes: &[u8]) -> Result<Table> {
        // Spreadsheet tools often prepend a byte order mark
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Self::format_error(format!("Failed to read header row: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(Self::format_error("File has no header row"));
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| Self::format_error(format!("Failed to read row {}: {}", i + 1, e)))?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        tracing::debug!(rows = rows.len(), columns = headers.len(), "Parsed CSV");
        Ok(Table::new(headers, rows))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["csv", "txt"]
    }

    fn format_name(&self) -> &str {
        "CSV"
    }
}
