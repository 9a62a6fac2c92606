//! to-utm command implementation

use crate::cli::ToUtmArgs;
use crate::errors::conversion_failed;
use crate::output::OutputWriter;
use crate::output_types::ToUtmOutput;
use anyhow::Result;
use geoconvert_core::models::MapView;
use geoconvert_core::{GeoPoint, PointConverter};
use geoconvert_geo::ProjEngine;

pub fn execute(
    args: ToUtmArgs,
    converter: &PointConverter<ProjEngine>,
    output: &OutputWriter,
) -> Result<()> {
    let point = GeoPoint::new(args.lat, args.lon).map_err(|e| conversion_failed(&e))?;
    let utm = converter.point_to_utm(point).map_err(|e| conversion_failed(&e))?;

    if output.is_json() {
        output.result(ToUtmOutput {
            latitude: args.lat,
            longitude: args.lon,
            zone: utm.zone().number(),
            hemisphere: utm.hemisphere(),
            easting: utm.easting(),
            northing: utm.northing(),
            map: MapView::single(point),
        })?;
    } else {
        output.section("UTM Coordinate");
        output.kv("Zone", utm.zone());
        output.kv("Hemisphere", utm.hemisphere());
        output.kv("Easting", format!("{:.3}", utm.easting()));
        output.kv("Northing", format!("{:.3}", utm.northing()));
    }

    Ok(())
}
