//! UTM zone resolution

/// Width of a UTM zone in degrees of longitude
pub const ZONE_WIDTH_DEGREES: f64 = 6.0;

/// Compute the UTM zone number for a longitude.
///
/// `floor((longitude + 180) / 6) + 1`, clamped to [1, 60] so that the
/// antimeridian (180°) falls in zone 60. The longitude is expected to be in
/// [-180, 180]; callers validate upstream.
pub fn zone_of(longitude: f64) -> u8 {
    let zone = ((longitude + 180.0) / ZONE_WIDTH_DEGREES).floor() + 1.0;
    zone.clamp(1.0, 60.0) as u8
}
