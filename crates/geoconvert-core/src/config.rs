use crate::error::{GeoconvertError, Result};
use crate::models::Hemisphere;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "geoconvert.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for geoconvert
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Field delimiter of CSV input
    pub input_delimiter: ConfigValue<u8>,
    /// Field delimiter of exported delimited text
    pub output_delimiter: ConfigValue<u8>,
    /// Hemisphere assumed for UTM input when none is given
    pub hemisphere: ConfigValue<Hemisphere>,
    /// Name prefix of KML placemarks
    pub placemark_prefix: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            input_delimiter: ConfigValue::new(b',', ConfigSource::Default),
            output_delimiter: ConfigValue::new(b';', ConfigSource::Default),
            hemisphere: ConfigValue::new(Hemisphere::South, ConfigSource::Default),
            placemark_prefix: ConfigValue::new("Point".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeoconvertError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeoconvertError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(delimiter) = file_config.input_delimiter {
            let delimiter = parse_delimiter("input_delimiter", &delimiter)?;
            self.input_delimiter.update(delimiter, ConfigSource::File);
        }

        if let Some(delimiter) = file_config.output_delimiter {
            let delimiter = parse_delimiter("output_delimiter", &delimiter)?;
            self.output_delimiter.update(delimiter, ConfigSource::File);
        }

        if let Some(hemisphere) = file_config.hemisphere {
            self.hemisphere.update(hemisphere, ConfigSource::File);
        }

        if let Some(prefix) = file_config.placemark_prefix {
            self.placemark_prefix.update(prefix, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load `geoconvert.toml` from `dir` when it exists
    pub fn load_from_dir_if_present<P: AsRef<Path>>(self, dir: P) -> Result<Self> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOCONVERT_INPUT_DELIMITER
        if let Ok(value) = env::var("GEOCONVERT_INPUT_DELIMITER") {
            match parse_delimiter("input_delimiter", &value) {
                Ok(d) => self.input_delimiter.update(d, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOCONVERT_INPUT_DELIMITER value '{}': expected a single ASCII character or 'tab'",
                    value
                ),
            }
        }

        // GEOCONVERT_OUTPUT_DELIMITER
        if let Ok(value) = env::var("GEOCONVERT_OUTPUT_DELIMITER") {
            match parse_delimiter("output_delimiter", &value) {
                Ok(d) => self.output_delimiter.update(d, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOCONVERT_OUTPUT_DELIMITER value '{}': expected a single ASCII character or 'tab'",
                    value
                ),
            }
        }

        // GEOCONVERT_HEMISPHERE
        if let Ok(value) = env::var("GEOCONVERT_HEMISPHERE") {
            match value.parse::<Hemisphere>() {
                Ok(h) => self.hemisphere.update(h, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOCONVERT_HEMISPHERE value '{}': expected north or south",
                    value
                ),
            }
        }

        // GEOCONVERT_PLACEMARK_PREFIX
        if let Ok(prefix) = env::var("GEOCONVERT_PLACEMARK_PREFIX") {
            self.placemark_prefix.update(prefix, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(d) = overrides.input_delimiter {
            self.input_delimiter.update(d, ConfigSource::Cli);
        }

        if let Some(d) = overrides.output_delimiter {
            self.output_delimiter.update(d, ConfigSource::Cli);
        }

        if let Some(h) = overrides.hemisphere {
            self.hemisphere.update(h, ConfigSource::Cli);
        }

        if let Some(prefix) = overrides.placemark_prefix {
            self.placemark_prefix.update(prefix, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "input_delimiter".to_string(),
            (display_delimiter(self.input_delimiter.value), self.input_delimiter.source),
        );

        map.insert(
            "output_delimiter".to_string(),
            (display_delimiter(self.output_delimiter.value), self.output_delimiter.source),
        );

        map.insert(
            "hemisphere".to_string(),
            (self.hemisphere.value.to_string().to_lowercase(), self.hemisphere.source),
        );

        map.insert(
            "placemark_prefix".to_string(),
            (self.placemark_prefix.value.clone(), self.placemark_prefix.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    input_delimiter: Option<String>,
    output_delimiter: Option<String>,
    hemisphere: Option<Hemisphere>,
    placemark_prefix: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub input_delimiter: Option<u8>,
    pub output_delimiter: Option<u8>,
    pub hemisphere: Option<Hemisphere>,
    pub placemark_prefix: Option<String>,
}

/// Parse a field delimiter: one ASCII character, or `tab`
pub fn parse_delimiter(key: &str, s: &str) -> Result<u8> {
    if s.eq_ignore_ascii_case("tab") || s == "\\t" || s == "\t" {
        return Ok(b'\t');
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Ok(c as u8),
        _ => Err(GeoconvertError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid delimiter: '{}'. Use a single ASCII character or 'tab'", s),
        }),
    }
}

fn display_delimiter(d: u8) -> String {
    match d {
        b'\t' => "tab".to_string(),
        other => char::from(other).to_string(),
    }
}
