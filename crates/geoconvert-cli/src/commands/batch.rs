//! batch command implementation

use super::to_decimal::warn_if_default_hemisphere;
use crate::cli::BatchArgs;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors::{input_not_found, missing_column_flags};
use crate::interactive::{select_column, ColumnRole};
use crate::output::OutputWriter;
use crate::output_types::{BatchCommandOutput, RowFailure};
use crate::progress::{batch_progress, finish_success, finish_warning};
use anyhow::{Context, Result};
use geoconvert_core::config::LayeredConfig;
use geoconvert_core::export::{to_delimited_text, to_kml_with_prefix};
use geoconvert_core::formats::FormatRegistry;
use geoconvert_core::models::MapView;
use geoconvert_core::{BatchOutput, BatchProcessor, ColumnMapping, Direction, PointConverter};
use geoconvert_geo::ProjEngine;
use std::fs;

/// Rows shown before and after conversion
const PREVIEW_ROWS: usize = 5;

/// Failed rows listed individually in human output
const MAX_LISTED_FAILURES: usize = 20;

pub fn execute(
    args: BatchArgs,
    config: &LayeredConfig,
    converter: &PointConverter<ProjEngine>,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    if !args.file.is_file() {
        return Err(input_not_found(&args.file.display().to_string()).into());
    }

    let direction: Direction = args.direction.into();
    let registry = FormatRegistry::with_defaults(config.input_delimiter.value);
    let format_name = registry.detect_format(&args.file)?.format_name().to_string();

    if dry_run {
        let actions = plan_actions(&args, direction, &format_name, config);
        return display_planned_actions(output, &actions);
    }

    if direction == Direction::UtmToDecimal {
        warn_if_default_hemisphere(config, output);
    }

    let table = registry.read(&args.file)?;

    output.section(format!(
        "Preview ({} of {} rows)",
        table.row_count().min(PREVIEW_ROWS),
        table.row_count()
    ));
    let head = table.head(PREVIEW_ROWS);
    output.grid(&head.headers, &head.rows);

    let mapping = resolve_mapping(&args, direction, &table.headers, config)?;
    mapping.validate(&table.headers)?;
    tracing::debug!(?mapping, "Resolved column mapping");

    let pb = batch_progress(table.row_count(), output.is_json());
    let batch = BatchProcessor::new(converter)
        .process_with_progress(&table, &mapping, |_| pb.inc(1))?;

    if batch.all_succeeded() {
        finish_success(&pb, &format!("Converted {} rows", batch.rows.len()));
    } else {
        finish_warning(
            &pb,
            &format!("Converted {} of {} rows", batch.success_count(), batch.rows.len()),
        );
    }

    let written = write_outputs(&args, &batch, config, output)?;

    if output.is_json() {
        let points = batch.points();
        output.result(BatchCommandOutput {
            input: args.file.display().to_string(),
            direction,
            total_rows: batch.rows.len(),
            converted: batch.success_count(),
            failed: batch.failure_count(),
            failures: row_failures(&batch),
            written,
            map: MapView::for_points(&points),
            table: batch.to_table(),
        })?;
    } else {
        print_summary(&batch, output);
        if args.csv.is_none() {
            let results = batch.to_table().head(PREVIEW_ROWS);
            output.section("Results");
            output.grid(&results.headers, &results.rows);
        }
    }

    Ok(())
}

/// Collects column names from flags, prompting for the missing ones in
/// interactive mode
struct ColumnResolver<'a> {
    headers: &'a [String],
    interactive: bool,
    missing: Vec<&'static str>,
}

impl ColumnResolver<'_> {
    fn resolve(&mut self, given: &Option<String>, role: ColumnRole, flag: &'static str) -> Result<String> {
        if let Some(column) = given {
            return Ok(column.clone());
        }
        if self.interactive {
            return select_column(self.headers, role);
        }
        self.missing.push(flag);
        Ok(String::new())
    }

    fn finish(self, direction: Direction) -> Result<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(missing_column_flags(direction, &self.missing, self.headers).into())
        }
    }
}

fn resolve_mapping(
    args: &BatchArgs,
    direction: Direction,
    headers: &[String],
    config: &LayeredConfig,
) -> Result<ColumnMapping> {
    let mut resolver = ColumnResolver {
        headers,
        interactive: args.interactive,
        missing: Vec::new(),
    };

    let mapping = match direction {
        Direction::DecimalToUtm => ColumnMapping::Decimal {
            latitude: resolver.resolve(&args.lat_col, ColumnRole::Latitude, "--lat-col <COLUMN>")?,
            longitude: resolver.resolve(&args.lon_col, ColumnRole::Longitude, "--lon-col <COLUMN>")?,
        },
        Direction::UtmToDecimal => ColumnMapping::Utm {
            zone: resolver.resolve(&args.zone_col, ColumnRole::Zone, "--zone-col <COLUMN>")?,
            easting: resolver.resolve(&args.easting_col, ColumnRole::Easting, "--easting-col <COLUMN>")?,
            northing: resolver.resolve(
                &args.northing_col,
                ColumnRole::Northing,
                "--northing-col <COLUMN>",
            )?,
            hemisphere: config.hemisphere.value,
        },
    };

    resolver.finish(direction)?;
    Ok(mapping)
}

fn write_outputs(
    args: &BatchArgs,
    batch: &BatchOutput,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    if let Some(path) = &args.kml {
        let points = batch.points();
        if points.is_empty() {
            output.warning("No row was converted; the KML file has no placemarks");
        }
        let content = to_kml_with_prefix(&points, &config.placemark_prefix.value)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), placemarks = points.len(), "KML written");
        output.success(format!("Wrote {} placemarks to {}", points.len(), path.display()));
        written.push(path.display().to_string());
    }

    if let Some(path) = &args.csv {
        let content = to_delimited_text(&batch.to_table(), config.output_delimiter.value)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        output.success(format!("Wrote {} rows to {}", batch.rows.len(), path.display()));
        written.push(path.display().to_string());
    }

    Ok(written)
}

fn row_failures(batch: &BatchOutput) -> Vec<RowFailure> {
    batch
        .failures()
        .map(|(index, error)| RowFailure {
            row: index + 1,
            kind: error.kind(),
            error: error.to_string(),
        })
        .collect()
}

fn print_summary(batch: &BatchOutput, output: &OutputWriter) {
    output.section("Summary");
    output.kv("Rows", batch.rows.len());
    output.kv("Converted", batch.success_count());
    output.kv("Failed", batch.failure_count());

    if batch.failure_count() == 0 {
        return;
    }

    output.section("Failed Rows");
    for failure in row_failures(batch).iter().take(MAX_LISTED_FAILURES) {
        output.warning(format!("Row {}: {}", failure.row, failure.error));
    }
    if batch.failure_count() > MAX_LISTED_FAILURES {
        output.warning(format!(
            "... and {} more",
            batch.failure_count() - MAX_LISTED_FAILURES
        ));
    }
}

fn plan_actions(
    args: &BatchArgs,
    direction: Direction,
    format_name: &str,
    config: &LayeredConfig,
) -> Vec<PlannedAction> {
    let mut actions = vec![PlannedAction::new(
        ActionType::ReadFile,
        format!("Read {}", args.file.display()),
    )
    .with_detail(format!("Format: {}", format_name))];

    let convert = match direction {
        Direction::DecimalToUtm => PlannedAction::new(ActionType::ConvertRows, "Convert decimal degrees to UTM")
            .with_detail("Appends: Zone, Hemisphere, Easting, Northing"),
        Direction::UtmToDecimal => PlannedAction::new(ActionType::ConvertRows, "Convert UTM to decimal degrees")
            .with_detail(format!("Hemisphere: {}", config.hemisphere.value))
            .with_detail("Appends: Latitude, Longitude"),
    };
    actions.push(convert);

    if let Some(path) = &args.kml {
        actions.push(
            PlannedAction::new(ActionType::WriteFile, format!("Write {}", path.display()))
                .with_detail("Format: KML 2.2, one placemark per converted row")
                .with_detail(format!("Placemark names: {} 1, {} 2, ...", config.placemark_prefix.value, config.placemark_prefix.value)),
        );
    }

    if let Some(path) = &args.csv {
        actions.push(
            PlannedAction::new(ActionType::WriteFile, format!("Write {}", path.display()))
                .with_detail(format!(
                    "Format: delimited text, delimiter '{}'",
                    char::from(config.output_delimiter.value)
                )),
        );
    }

    actions
}
