//! Configuration loading for CLI commands

use anyhow::Result;
use geoconvert_core::config::{CliConfigOverrides, LayeredConfig};

use crate::cli::Cli;

/// Load layered configuration: defaults, then the config file, then
/// `GEOCONVERT_*` variables, then global CLI flags.
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match &cli.config {
        Some(path) => config.load_from_file(path)?,
        None => config.load_from_dir_if_present(std::env::current_dir()?)?,
    };

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        input_delimiter: cli.input_delimiter,
        output_delimiter: cli.output_delimiter,
        hemisphere: cli.hemisphere,
        placemark_prefix: None,
    });

    Ok(config)
}
