//! GeoConvert Geo - PROJ-backed projections and geodesic measurements
//!
//! This crate provides the [`transform::ProjEngine`] adapter for the
//! projection port defined in `geoconvert-core`, plus geodesic distance
//! helpers built on the `geo` crate.

pub mod distance;
pub mod models;
pub mod transform;

pub use distance::geodesic_distance;
pub use transform::ProjEngine;

use geoconvert_core::PointConverter;

/// Point converter backed by PROJ
pub fn converter() -> PointConverter<ProjEngine> {
    PointConverter::new(ProjEngine::new())
}
