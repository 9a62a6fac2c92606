use geoconvert_core::config::LayeredConfig;
use geoconvert_core::PointConverter;
use geoconvert_geo::ProjEngine;

#[derive(Debug, Clone)]
pub struct AppState {
    pub converter: PointConverter<ProjEngine>,
    pub config: LayeredConfig,
}

impl AppState {
    pub fn new(config: LayeredConfig) -> Self {
        Self {
            converter: geoconvert_geo::converter(),
            config,
        }
    }
}
