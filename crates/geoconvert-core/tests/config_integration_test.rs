//! Integration tests for layered configuration
//!
//! Precedence: CLI arguments > Environment variables > Config file > Defaults

use geoconvert_core::config::{parse_delimiter, CliConfigOverrides, ConfigSource, LayeredConfig};
use geoconvert_core::Hemisphere;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const ENV_KEYS: [&str; 4] = [
    "GEOCONVERT_INPUT_DELIMITER",
    "GEOCONVERT_OUTPUT_DELIMITER",
    "GEOCONVERT_HEMISPHERE",
    "GEOCONVERT_PLACEMARK_PREFIX",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_partial_file_configuration() {
    let file = config_file(r#"hemisphere = "north""#);

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.hemisphere.value, Hemisphere::North);
    assert_eq!(config.hemisphere.source, ConfigSource::File);
    assert_eq!(config.output_delimiter.value, b';');
    assert_eq!(config.output_delimiter.source, ConfigSource::Default);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let file = config_file(
        r#"
output_delimiter = ","
placemark_prefix = "File"
"#,
    );
    env::set_var("GEOCONVERT_OUTPUT_DELIMITER", "tab");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    clear_env();

    assert_eq!(config.output_delimiter.value, b'\t');
    assert_eq!(config.output_delimiter.source, ConfigSource::Environment);
    assert_eq!(config.placemark_prefix.value, "File");
    assert_eq!(config.placemark_prefix.source, ConfigSource::File);
}

#[test]
#[serial]
fn test_configuration_precedence_order() {
    clear_env();
    let file = config_file(r#"hemisphere = "north""#);
    env::set_var("GEOCONVERT_HEMISPHERE", "south");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    assert_eq!(config.hemisphere.value, Hemisphere::South);
    assert_eq!(config.hemisphere.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        hemisphere: Some(Hemisphere::North),
        ..Default::default()
    });

    clear_env();

    assert_eq!(config.hemisphere.value, Hemisphere::North);
    assert_eq!(config.hemisphere.source, ConfigSource::Cli);
}

#[test]
#[serial]
fn test_invalid_environment_value_is_ignored() {
    clear_env();
    env::set_var("GEOCONVERT_INPUT_DELIMITER", "comma");

    let config = LayeredConfig::with_defaults().load_from_env();

    clear_env();

    assert_eq!(config.input_delimiter.value, b',');
    assert_eq!(config.input_delimiter.source, ConfigSource::Default);
}

#[test]
fn test_invalid_toml_file() {
    let file = config_file("hemisphere = [not toml");
    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}

#[test]
fn test_invalid_hemisphere_in_file() {
    let file = config_file(r#"hemisphere = "Sul""#);
    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}

#[test]
fn test_missing_config_file() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/geoconvert.toml");
    assert!(result.is_err());
}

#[test]
fn test_parse_delimiter_variations() {
    assert_eq!(parse_delimiter("output_delimiter", "|").unwrap(), b'|');
    assert_eq!(parse_delimiter("output_delimiter", "Tab").unwrap(), b'\t');
    assert!(parse_delimiter("output_delimiter", "semicolon").is_err());
}
