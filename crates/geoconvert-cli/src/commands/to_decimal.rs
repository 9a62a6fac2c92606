//! to-decimal command implementation

use crate::cli::ToDecimalArgs;
use crate::errors::conversion_failed;
use crate::output::OutputWriter;
use crate::output_types::ToDecimalOutput;
use anyhow::Result;
use geoconvert_core::config::{ConfigSource, LayeredConfig};
use geoconvert_core::models::MapView;
use geoconvert_core::PointConverter;
use geoconvert_geo::ProjEngine;

pub fn execute(
    args: ToDecimalArgs,
    config: &LayeredConfig,
    converter: &PointConverter<ProjEngine>,
    output: &OutputWriter,
) -> Result<()> {
    let hemisphere = config.hemisphere.value;
    warn_if_default_hemisphere(config, output);

    let point = converter
        .utm_to_decimal(args.zone, args.easting, args.northing, hemisphere)
        .map_err(|e| conversion_failed(&e))?;

    if output.is_json() {
        output.result(ToDecimalOutput {
            zone: args.zone,
            hemisphere,
            easting: args.easting,
            northing: args.northing,
            latitude: point.latitude(),
            longitude: point.longitude(),
            map: MapView::single(point),
        })?;
    } else {
        output.section("Decimal Coordinate");
        output.kv("Latitude", format!("{:.8}", point.latitude()));
        output.kv("Longitude", format!("{:.8}", point.longitude()));
    }

    Ok(())
}

/// UTM coordinates alone cannot tell the hemisphere, so a fallback to the
/// built-in default is reported
pub(crate) fn warn_if_default_hemisphere(config: &LayeredConfig, output: &OutputWriter) {
    if config.hemisphere.source == ConfigSource::Default {
        output.warning(format!(
            "No hemisphere given, assuming {}. Use --hemisphere north|south",
            config.hemisphere.value
        ));
    }
}
