//! GeoConvert Core - Domain models, conversion pipeline, and configuration
//!
//! This crate contains the coordinate conversion core: the zone resolver, the
//! point converter built on the [`ports::ProjectionEngine`] port, the batch
//! processor over tabular input, table readers, and the KML / delimited-text
//! export builders.

pub mod batch;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod formats;
pub mod models;
pub mod ports;
pub mod zone;

pub use batch::{BatchOutput, BatchProcessor, BatchRow, ColumnMapping, ConvertedPoint};
pub use convert::PointConverter;
pub use error::{ConversionError, ConversionResult, GeoconvertError, Result};
pub use models::{Direction, GeoPoint, Hemisphere, Table, UtmPoint, UtmZone};
pub use zone::zone_of;
