use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConversionError, ConversionResult};
use crate::zone::zone_of;

/// Geographic point in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> ConversionResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ConversionError::validation(
                "latitude",
                format!("{} is outside [-90, 90]", latitude),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ConversionError::validation(
                "longitude",
                format!("{} is outside [-180, 180]", longitude),
            ));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}, {:.8}", self.latitude, self.longitude)
    }
}

/// Hemisphere of a UTM coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[serde(alias = "n", alias = "N", alias = "North")]
    North,
    #[serde(alias = "s", alias = "S", alias = "South")]
    South,
}

impl Hemisphere {
    /// South for negative latitudes, North otherwise (the equator is North)
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    /// Single-letter designator used in tabular output
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::North => write!(f, "North"),
            Hemisphere::South => write!(f, "South"),
        }
    }
}

impl FromStr for Hemisphere {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" => Ok(Hemisphere::North),
            "south" | "s" => Ok(Hemisphere::South),
            _ => Err(ConversionError::validation(
                "hemisphere",
                format!("'{}' is not a hemisphere. Use north or south", s),
            )),
        }
    }
}

/// UTM zone number, always within [1, 60]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UtmZone(u8);

impl UtmZone {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 60;

    pub fn new(zone: u8) -> ConversionResult<Self> {
        Self::from_number(i64::from(zone))
    }

    /// Like [`new`](Self::new) for zone numbers of any size, as read from
    /// JSON bodies or table cells
    pub fn from_number(zone: i64) -> ConversionResult<Self> {
        match u8::try_from(zone) {
            Ok(z) if (Self::MIN..=Self::MAX).contains(&z) => Ok(Self(z)),
            _ => Err(ConversionError::validation(
                "zone",
                format!("{} is outside [{}, {}]", zone, Self::MIN, Self::MAX),
            )),
        }
    }

    /// Zone containing the given longitude
    pub fn from_longitude(longitude: f64) -> Self {
        Self(zone_of(longitude))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Longitude of the zone's central meridian
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.0) * 6.0 - 183.0
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Projected UTM coordinate (metres)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtmPoint {
    zone: UtmZone,
    hemisphere: Hemisphere,
    easting: f64,
    northing: f64,
}

impl UtmPoint {
    pub fn new(zone: UtmZone, hemisphere: Hemisphere, easting: f64, northing: f64) -> Self {
        Self {
            zone,
            hemisphere,
            easting,
            northing,
        }
    }

    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }
}

impl fmt::Display for UtmPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {:.3}E {:.3}N",
            self.zone,
            self.hemisphere.letter(),
            self.easting,
            self.northing
        )
    }
}

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    DecimalToUtm,
    UtmToDecimal,
}

impl FromStr for Direction {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "to_utm" | "decimal_to_utm" | "utm" => Ok(Direction::DecimalToUtm),
            "to_decimal" | "utm_to_decimal" | "decimal" => Ok(Direction::UtmToDecimal),
            _ => Err(ConversionError::validation(
                "direction",
                format!("'{}' is not a direction. Use to-utm or to-decimal", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_bounds() {
        assert!(GeoPoint::new(-25.0143, 32.5833).is_ok());
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.0001, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_hemisphere_from_latitude() {
        assert_eq!(Hemisphere::from_latitude(-0.0001), Hemisphere::South);
        assert_eq!(Hemisphere::from_latitude(-89.0), Hemisphere::South);
        assert_eq!(Hemisphere::from_latitude(0.0), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(45.0), Hemisphere::North);
    }

    #[test]
    fn test_hemisphere_parse() {
        assert_eq!("north".parse::<Hemisphere>().unwrap(), Hemisphere::North);
        assert_eq!("S".parse::<Hemisphere>().unwrap(), Hemisphere::South);
        assert_eq!(" South ".parse::<Hemisphere>().unwrap(), Hemisphere::South);
        // Localized labels are not guessed from their first letter
        assert!("Sul".parse::<Hemisphere>().is_err());
        assert!("Norte".parse::<Hemisphere>().is_err());
    }

    #[test]
    fn test_hemisphere_deserialize_accepts_letters() {
        for (input, expected) in [
            ("\"north\"", Hemisphere::North),
            ("\"n\"", Hemisphere::North),
            ("\"S\"", Hemisphere::South),
            ("\"south\"", Hemisphere::South),
        ] {
            let parsed: Hemisphere = serde_json::from_str(input).unwrap();
            assert_eq!(parsed, expected, "{}", input);
        }
        assert!(serde_json::from_str::<Hemisphere>("\"sul\"").is_err());
    }

    #[test]
    fn test_zone_bounds() {
        assert!(UtmZone::new(0).is_err());
        assert!(UtmZone::new(61).is_err());
        assert!(matches!(UtmZone::from_number(300), Err(ConversionError::Validation { .. })));
        assert!(UtmZone::from_number(-36).is_err());
        assert_eq!(UtmZone::from_number(60).unwrap().number(), 60);
        assert_eq!(UtmZone::new(36).unwrap().number(), 36);
        assert_eq!(UtmZone::new(36).unwrap().central_meridian(), 33.0);
        assert_eq!(UtmZone::new(1).unwrap().central_meridian(), -177.0);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("to-utm".parse::<Direction>().unwrap(), Direction::DecimalToUtm);
        assert_eq!("UTM_TO_DECIMAL".parse::<Direction>().unwrap(), Direction::UtmToDecimal);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_utm_display() {
        let point = UtmPoint::new(UtmZone::new(36).unwrap(), Hemisphere::South, 754128.0, 6947467.5);
        assert_eq!(point.to_string(), "36S 754128.000E 6947467.500N");
    }
}
