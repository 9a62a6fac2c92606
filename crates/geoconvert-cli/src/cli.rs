use clap::{Parser, Subcommand, ValueEnum};
use geoconvert_core::config::parse_delimiter;
use geoconvert_core::{Direction, GeoPoint, Hemisphere};
use std::path::PathBuf;

/// GeoConvert - UTM <-> decimal degree coordinate converter
#[derive(Parser, Debug)]
#[command(name = "geoconvert")]
#[command(about = "Convert coordinates between decimal degrees and UTM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show planned actions without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Configuration file (defaults to ./geoconvert.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field delimiter of CSV input (a single character, or "tab")
    #[arg(long, global = true, value_name = "CHAR", value_parser = parse_delimiter_arg)]
    pub input_delimiter: Option<u8>,

    /// Field delimiter of CSV output (a single character, or "tab")
    #[arg(long, global = true, value_name = "CHAR", value_parser = parse_delimiter_arg)]
    pub output_delimiter: Option<u8>,

    /// Hemisphere of UTM input (north or south)
    #[arg(long, global = true, value_parser = parse_hemisphere_arg)]
    pub hemisphere: Option<Hemisphere>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a decimal latitude/longitude to UTM
    ToUtm(ToUtmArgs),

    /// Convert a UTM coordinate to decimal latitude/longitude
    ToDecimal(ToDecimalArgs),

    /// Convert every row of a CSV or Excel file
    Batch(BatchArgs),

    /// Geodesic distance between two points
    Distance(DistanceArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct ToUtmArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(Parser, Debug)]
pub struct ToDecimalArgs {
    /// UTM zone number (1-60)
    #[arg(long)]
    pub zone: u8,

    /// Easting in metres
    #[arg(long, allow_negative_numbers = true)]
    pub easting: f64,

    /// Northing in metres
    #[arg(long, allow_negative_numbers = true)]
    pub northing: f64,
}

/// Conversion direction of a batch
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    /// Decimal latitude/longitude columns to UTM
    ToUtm,
    /// UTM zone/easting/northing columns to decimal degrees
    ToDecimal,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::ToUtm => Direction::DecimalToUtm,
            DirectionArg::ToDecimal => Direction::UtmToDecimal,
        }
    }
}

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Input file (CSV or XLSX, with a header row)
    pub file: PathBuf,

    /// Conversion direction
    #[arg(long, value_enum)]
    pub direction: DirectionArg,

    /// Latitude column (to-utm)
    #[arg(long, value_name = "COLUMN")]
    pub lat_col: Option<String>,

    /// Longitude column (to-utm)
    #[arg(long, value_name = "COLUMN")]
    pub lon_col: Option<String>,

    /// Zone column (to-decimal)
    #[arg(long, value_name = "COLUMN")]
    pub zone_col: Option<String>,

    /// Easting column (to-decimal)
    #[arg(long, value_name = "COLUMN")]
    pub easting_col: Option<String>,

    /// Northing column (to-decimal)
    #[arg(long, value_name = "COLUMN")]
    pub northing_col: Option<String>,

    /// Write successfully converted points as KML
    #[arg(long, value_name = "PATH")]
    pub kml: Option<PathBuf>,

    /// Write the input table with result columns appended
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Interactive mode - prompt for missing columns
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(Parser, Debug)]
pub struct DistanceArgs {
    /// First point as "lat,lon"
    #[arg(long, allow_hyphen_values = true, value_parser = parse_point_arg)]
    pub from: GeoPoint,

    /// Second point as "lat,lon"
    #[arg(long, allow_hyphen_values = true, value_parser = parse_point_arg)]
    pub to: GeoPoint,
}

fn parse_delimiter_arg(s: &str) -> Result<u8, String> {
    parse_delimiter("delimiter", s).map_err(|e| e.to_string())
}

fn parse_hemisphere_arg(s: &str) -> Result<Hemisphere, String> {
    s.parse::<Hemisphere>().map_err(|e| e.to_string())
}

/// Parse `"lat,lon"` into a validated point
pub fn parse_point_arg(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got \"{}\"", s))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude \"{}\"", lat.trim()))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("invalid longitude \"{}\"", lon.trim()))?;
    GeoPoint::new(lat, lon).map_err(|e| e.to_string())
}
