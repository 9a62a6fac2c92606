use anyhow::Result;
use dialoguer::Select;

/// Header names that commonly hold each coordinate
const LATITUDE_HINTS: &[&str] = &["latitude", "lat", "y"];
const LONGITUDE_HINTS: &[&str] = &["longitude", "lon", "lng", "long", "x"];
const ZONE_HINTS: &[&str] = &["zone", "zona", "fuso"];
const EASTING_HINTS: &[&str] = &["easting", "este", "east", "e", "x"];
const NORTHING_HINTS: &[&str] = &["northing", "norte", "north", "n", "y"];

/// Which coordinate a column prompt is for
#[derive(Debug, Clone, Copy)]
pub enum ColumnRole {
    Latitude,
    Longitude,
    Zone,
    Easting,
    Northing,
}

impl ColumnRole {
    fn label(&self) -> &'static str {
        match self {
            ColumnRole::Latitude => "Latitude column",
            ColumnRole::Longitude => "Longitude column",
            ColumnRole::Zone => "Zone column",
            ColumnRole::Easting => "Easting column",
            ColumnRole::Northing => "Northing column",
        }
    }

    fn hints(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Latitude => LATITUDE_HINTS,
            ColumnRole::Longitude => LONGITUDE_HINTS,
            ColumnRole::Zone => ZONE_HINTS,
            ColumnRole::Easting => EASTING_HINTS,
            ColumnRole::Northing => NORTHING_HINTS,
        }
    }
}

/// Index of the header that most likely holds `role`
pub fn guess_column(headers: &[String], role: ColumnRole) -> Option<usize> {
    role.hints().iter().find_map(|hint| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(hint))
    })
}

/// Ask the user to pick the column holding `role`
pub fn select_column(headers: &[String], role: ColumnRole) -> Result<String> {
    let default = guess_column(headers, role).unwrap_or(0);
    let index = Select::new()
        .with_prompt(role.label())
        .items(headers)
        .default(default)
        .interact()?;
    Ok(headers[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_guess_decimal_columns() {
        let h = headers(&["Nome", "Latitude", "Longitude"]);
        assert_eq!(guess_column(&h, ColumnRole::Latitude), Some(1));
        assert_eq!(guess_column(&h, ColumnRole::Longitude), Some(2));
        assert_eq!(guess_column(&h, ColumnRole::Zone), None);
    }

    #[test]
    fn test_guess_utm_columns() {
        let h = headers(&["Zona", "E", "N"]);
        assert_eq!(guess_column(&h, ColumnRole::Zone), Some(0));
        assert_eq!(guess_column(&h, ColumnRole::Easting), Some(1));
        assert_eq!(guess_column(&h, ColumnRole::Northing), Some(2));
    }
}
