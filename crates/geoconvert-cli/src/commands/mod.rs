//! Command implementations

mod batch;
mod config;
mod distance;
mod to_decimal;
mod to_utm;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;
    let converter = geoconvert_geo::converter();

    match cli.command {
        Commands::ToUtm(args) => to_utm::execute(args, &converter, &output),
        Commands::ToDecimal(args) => to_decimal::execute(args, &config, &converter, &output),
        Commands::Batch(args) => batch::execute(args, &config, &converter, &output, cli.dry_run),
        Commands::Distance(args) => distance::execute(args, &output),
        Commands::Config => config::execute(&config, &output),
    }
}
