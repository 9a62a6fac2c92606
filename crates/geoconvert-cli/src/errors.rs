use console::style;
use geoconvert_core::error::ErrorKind;
use geoconvert_core::{ConversionError, Direction, GeoconvertError};
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a missing input file
pub fn input_not_found(path: &str) -> CliError {
    CliError::new("Input file not found")
        .with_context(format!("The specified input file does not exist.\n\nPath: {}", path))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Use absolute path or path relative to current directory")
        .with_help("Run: geoconvert batch --help")
}

/// Create error for a mapped column that is not in the header
pub fn column_not_found(column: &str, available: &str) -> CliError {
    CliError::new(format!("Column '{}' not found", column))
        .with_context(format!("Available columns: {}", available))
        .with_suggestion("Column names are case-sensitive; copy one from the list above")
        .with_suggestion("Or pick columns interactively: geoconvert batch <file> --interactive")
        .with_help("Run: geoconvert batch --help")
}

/// Create error for column flags that were not given
pub fn missing_column_flags(direction: Direction, missing: &[&str], headers: &[String]) -> CliError {
    let direction_arg = match direction {
        Direction::DecimalToUtm => "to-utm",
        Direction::UtmToDecimal => "to-decimal",
    };
    CliError::new("Coordinate columns not specified")
        .with_context(format!(
            "A {} batch needs to know which columns hold the coordinates.\n\nMissing: {}\nAvailable columns: {}",
            direction_arg,
            missing.join(", "),
            headers.join(", ")
        ))
        .with_suggestion(format!("Pass {}", missing.join(" ")))
        .with_suggestion("Or pick columns interactively with --interactive")
        .with_help("Run: geoconvert batch --help")
}

/// Create error for an unsupported input format
pub fn unsupported_format(extension: &str, supported: &[String]) -> CliError {
    CliError::new(format!("Unsupported file format '{}'", extension))
        .with_context(format!("Supported formats: {}", supported.join(", ")))
        .with_suggestion("Export the sheet as CSV or XLSX and try again")
        .with_help("Run: geoconvert batch --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check geoconvert.toml for syntax errors")
        .with_suggestion("Check GEOCONVERT_* environment variables")
        .with_help("Run: geoconvert config")
}

/// Create error for a failed single-point conversion
pub fn conversion_failed(error: &ConversionError) -> CliError {
    let err = CliError::new("Conversion failed").with_context(error.to_string());
    match error.kind() {
        ErrorKind::Validation => err
            .with_suggestion("Latitude must be within [-90, 90] and longitude within [-180, 180]")
            .with_suggestion("UTM zones are numbered 1 to 60"),
        ErrorKind::Projection => err
            .with_suggestion("Check that easting and northing belong to the given zone")
            .with_suggestion("Check the hemisphere: --hemisphere north|south"),
        ErrorKind::Parse => err.with_suggestion("Use a dot as decimal separator, e.g. -25.0143"),
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    if let Some(core_error) = error.downcast_ref::<GeoconvertError>() {
        return match core_error {
            GeoconvertError::ColumnNotFound { column, available } => {
                column_not_found(column, available)
            }
            GeoconvertError::UnsupportedFormat {
                extension,
                supported,
            } => unsupported_format(extension, supported),
            GeoconvertError::ConfigInvalid { key, reason } => invalid_config(key, reason),
            GeoconvertError::Conversion(e) => conversion_failed(e),
            GeoconvertError::FormatError { format, message } => {
                CliError::new(format!("Cannot read {} file", format))
                    .with_context(message.clone())
                    .with_suggestion("Make sure the first row holds the column names")
                    .with_suggestion("For CSV files, check the delimiter: --input-delimiter ';'")
            }
            GeoconvertError::Export { format, message } => {
                CliError::new(format!("Failed to build {} output", format))
                    .with_context(message.clone())
            }
            GeoconvertError::Io(e) => io_error(&e.to_string()),
        };
    }

    io_error(&format!("{:#}", error))
}

fn io_error(message: &str) -> CliError {
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.to_lowercase().contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or run with appropriate privileges")
    } else {
        CliError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_passes_through() {
        let error = anyhow::Error::new(CliError::new("custom").with_suggestion("do this"));
        let cli_error = from_anyhow(error);
        assert_eq!(cli_error.message, "custom");
        assert_eq!(cli_error.suggestions.len(), 1);
    }

    #[test]
    fn test_column_not_found_mapping() {
        let error = anyhow::Error::new(GeoconvertError::ColumnNotFound {
            column: "Lat".to_string(),
            available: "lat, lon".to_string(),
        });
        let cli_error = from_anyhow(error);
        assert_eq!(cli_error.message, "Column 'Lat' not found");
        assert!(cli_error.context.unwrap().contains("lat, lon"));
    }

    #[test]
    fn test_conversion_error_suggestions() {
        let error = ConversionError::validation("zone", "61 is outside [1, 60]");
        let cli_error = conversion_failed(&error);
        assert!(cli_error.context.unwrap().contains("61"));
        assert!(!cli_error.suggestions.is_empty());
    }
}
