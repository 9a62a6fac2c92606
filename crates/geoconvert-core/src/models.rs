pub mod map;
pub mod point;
pub mod table;

pub use map::{MapMarker, MapView};
pub use point::{Direction, GeoPoint, Hemisphere, UtmPoint, UtmZone};
pub use table::Table;
