//! Table readers for batch input
//!
//! Each input format implements [`TableReader`]. The [`FormatRegistry`]
//! picks a reader from the file extension.

use std::fs;
use std::path::Path;

use crate::error::{GeoconvertError, Result};
use crate::models::Table;

pub mod csv;
pub mod xlsx;

pub use self::csv::CsvReader;
pub use self::xlsx::XlsxReader;

/// Reads a file with a header row into a [`Table`]
pub trait TableReader: Send + Sync {
    /// Read a table from the given path
    fn read(&self, path: &Path) -> Result<Table> {
        let bytes = fs::read(path)?;
        self.read_bytes(&bytes)
    }

    /// Read a table from an in-memory file (e.g. an upload)
    fn read_bytes(&self, bytes: &[u8]) -> Result<Table>;

    /// Get supported file extensions (e.g., ["csv"])
    fn supported_extensions(&self) -> &[&str];

    /// Get human-readable format name (e.g., "CSV", "Excel")
    fn format_name(&self) -> &str;
}

/// Central registry for table readers
pub struct FormatRegistry {
    readers: Vec<Box<dyn TableReader>>,
}

impl FormatRegistry {
    /// Create a new empty format registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Registry with the CSV and XLSX readers
    pub fn with_defaults(csv_delimiter: u8) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CsvReader::new(csv_delimiter)));
        registry.register(Box::new(XlsxReader::new()));
        registry
    }

    /// Register a table reader
    pub fn register(&mut self, reader: Box<dyn TableReader>) {
        self.readers.push(reader);
    }

    /// Detect format and return appropriate reader.
    ///
    /// The extension is matched case-insensitively.
    pub fn detect_format(&self, path: &Path) -> Result<&dyn TableReader> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| GeoconvertError::UnsupportedFormat {
                extension: "none".to_string(),
                supported: self.supported_formats(),
            })?;

        self.reader_for_extension(extension)
    }

    /// Reader registered for an extension such as `xlsx`
    pub fn reader_for_extension(&self, extension: &str) -> Result<&dyn TableReader> {
        let extension = extension.to_lowercase();
        self.readers
            .iter()
            .find(|r| r.supported_extensions().contains(&extension.as_str()))
            .map(|r| r.as_ref())
            .ok_or_else(|| GeoconvertError::UnsupportedFormat {
                extension,
                supported: self.supported_formats(),
            })
    }

    /// Detect the format of `path` and read it
    pub fn read(&self, path: &Path) -> Result<Table> {
        let reader = self.detect_format(path)?;
        let table = reader.read(path)?;
        tracing::info!(
            path = %path.display(),
            format = reader.format_name(),
            rows = table.row_count(),
            columns = table.column_count(),
            "Table loaded"
        );
        Ok(table)
    }

    /// Get list of all supported format extensions
    pub fn supported_formats(&self) -> Vec<String> {
        self.readers
            .iter()
            .flat_map(|r| r.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
