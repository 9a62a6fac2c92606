//! distance command implementation

use crate::cli::DistanceArgs;
use crate::output::OutputWriter;
use crate::output_types::DistanceOutput;
use anyhow::Result;
use geoconvert_geo::geodesic_distance;

pub fn execute(args: DistanceArgs, output: &OutputWriter) -> Result<()> {
    let meters = geodesic_distance(args.from, args.to);

    if output.is_json() {
        output.result(DistanceOutput {
            from: [args.from.latitude(), args.from.longitude()],
            to: [args.to.latitude(), args.to.longitude()],
            meters,
        })?;
    } else {
        output.kv("From", args.from);
        output.kv("To", args.to);
        output.kv("Distance", format!("{:.3} m ({:.3} km)", meters, meters / 1000.0));
    }

    Ok(())
}
