//! Error types for GeoConvert

use serde::Serialize;
use thiserror::Error;

/// Failure of a single conversion: one point, or one batch row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Projection failed: {reason}")]
    Projection { reason: String },

    #[error("Cannot parse column '{column}' value '{value}' as {expected}")]
    Parse {
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("Row has no value for column '{column}'")]
    MissingColumn { column: String },
}

/// Taxonomy tag of a [`ConversionError`], used when errors cross a
/// serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Projection,
    Parse,
}

impl ConversionError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn projection(reason: impl Into<String>) -> Self {
        Self::Projection {
            reason: reason.into(),
        }
    }

    /// A missing cell is reported like an unparsable one.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::Validation { .. } => ErrorKind::Validation,
            ConversionError::Projection { .. } => ErrorKind::Projection,
            ConversionError::Parse { .. } | ConversionError::MissingColumn { .. } => {
                ErrorKind::Parse
            }
        }
    }
}

pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

#[derive(Debug, Error)]
pub enum GeoconvertError {
    // Single point errors
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    // Batch errors
    #[error("Column '{column}' not found. Available columns: {available}")]
    ColumnNotFound { column: String, available: String },

    // Input format errors
    #[error("Unsupported table format '{extension}'. Supported: {}", .supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    #[error("Failed to read {format} table: {message}")]
    FormatError { format: String, message: String },

    // Export errors
    #[error("Failed to build {format} export: {message}")]
    Export { format: String, message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeoconvertError {
    /// True for errors raised before any row could be processed
    /// (unreadable file, unknown format).
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            GeoconvertError::Io(_)
                | GeoconvertError::FormatError { .. }
                | GeoconvertError::UnsupportedFormat { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeoconvertError>;
