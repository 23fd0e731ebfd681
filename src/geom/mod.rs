mod parse;

pub use parse::{parse_area, parse_geojson, parse_geometry, parse_wkt};

use crate::coord::Coordinate;
use crate::error::KnetError;
use crate::index::parse_name;
use geo_types::{Coord, LineString, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// Bounding box of a tile in UTM coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileExtent {
    pub min_easting: i64,
    pub min_northing: i64,
    pub max_easting: i64,
    pub max_northing: i64,
}

impl TileExtent {
    pub fn width(&self) -> i64 {
        self.max_easting - self.min_easting
    }

    pub fn height(&self) -> i64 {
        self.max_northing - self.min_northing
    }

    /// Whether the point lies in the half-open extent `[min, max)` on both axes.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        (self.min_easting as f64..self.max_easting as f64).contains(&coord.easting())
            && (self.min_northing as f64..self.max_northing as f64).contains(&coord.northing())
    }

    /// Whether `other` lies completely inside this extent.
    pub fn contains_extent(&self, other: &TileExtent) -> bool {
        self.min_easting <= other.min_easting
            && self.min_northing <= other.min_northing
            && other.max_easting <= self.max_easting
            && other.max_northing <= self.max_northing
    }

    /// Corners of the closed ring: lower-left, upper-left, upper-right,
    /// lower-right and lower-left again.
    fn ring(&self) -> [Coord<f64>; 5] {
        let (min_x, min_y) = (self.min_easting as f64, self.min_northing as f64);
        let (max_x, max_y) = (self.max_easting as f64, self.max_northing as f64);
        [
            coord! { x: min_x, y: min_y },
            coord! { x: min_x, y: max_y },
            coord! { x: max_x, y: max_y },
            coord! { x: max_x, y: min_y },
            coord! { x: min_x, y: min_y },
        ]
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_easting as f64, y: self.min_northing as f64 },
            coord! { x: self.max_easting as f64, y: self.max_northing as f64 },
        )
    }

    /// Converts the extent to a square polygon with the ring order of [`wkt_from_name`].
    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.ring().to_vec()), vec![])
    }

    /// Renders the extent as a WKT polygon with two decimals per ordinate.
    pub fn to_wkt(&self) -> String {
        let ring = self
            .ring()
            .iter()
            .map(|c| format!("{:.2} {:.2}", c.x, c.y))
            .collect::<Vec<_>>()
            .join(",");
        format!("POLYGON(({}))", ring)
    }
}

impl From<TileExtent> for Rect<f64> {
    fn from(extent: TileExtent) -> Self {
        extent.to_rect()
    }
}

impl From<TileExtent> for Polygon<f64> {
    fn from(extent: TileExtent) -> Self {
        extent.to_polygon()
    }
}

/// Converts a tile name, possibly embedded in other text, into its bounding box.
///
/// # Example
/// ```
/// use kvadratnet_rs::extent_from_name;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// let extent = extent_from_name("1km_6223_575")?;
/// assert_eq!(extent.min_easting, 575000);
/// assert_eq!(extent.max_northing, 6224000);
/// # Ok(())
/// # }
/// ```
pub fn extent_from_name(name: &str) -> Result<TileExtent, KnetError> {
    let tile = parse_name(name)?;

    Ok(TileExtent {
        min_easting: tile.easting,
        min_northing: tile.northing,
        max_easting: tile.easting + tile.size,
        max_northing: tile.northing + tile.size,
    })
}

/// Creates a WKT polygon from a tile name.
///
/// ```
/// use kvadratnet_rs::wkt_from_name;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// let wkt = wkt_from_name("100km_62_5")?;
/// assert!(wkt.starts_with("POLYGON((500000.00 6200000.00,"));
/// # Ok(())
/// # }
/// ```
pub fn wkt_from_name(name: &str) -> Result<String, KnetError> {
    Ok(extent_from_name(name)?.to_wkt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use wkt::Wkt;

    #[test]
    fn test_extent_from_name() -> Result<(), KnetError> {
        let extent = extent_from_name("1km_6223_575")?;
        assert_eq!(
            (
                extent.min_easting,
                extent.min_northing,
                extent.max_easting,
                extent.max_northing
            ),
            (575000, 6223000, 576000, 6224000)
        );

        let extent = extent_from_name("10km_622_57")?;
        assert_eq!(
            extent,
            TileExtent {
                min_easting: 570000,
                min_northing: 6220000,
                max_easting: 580000,
                max_northing: 6230000,
            }
        );
        Ok(())
    }

    #[test]
    fn test_extent_from_bad_name() {
        assert!(matches!(
            extent_from_name("BadName"),
            Err(KnetError::InvalidTileName(_))
        ));
        assert!(wkt_from_name("BadName").is_err());
    }

    #[test]
    fn test_extent_is_one_tile_wide() -> Result<(), KnetError> {
        for (name, size) in [
            ("100m_62237_5756", 100),
            ("250m_622375_57550", 250),
            ("50km_620_55", 50000),
        ] {
            let extent = extent_from_name(name)?;
            assert_eq!(extent.width(), size);
            assert_eq!(extent.height(), size);
        }
        Ok(())
    }

    #[test]
    fn test_extent_contains_is_half_open() -> Result<(), KnetError> {
        let extent = extent_from_name("1km_6223_575")?;
        assert!(extent.contains(&(575000.0, 6223000.0)));
        assert!(extent.contains(&(575999.9, 6223999.9)));
        assert!(!extent.contains(&(576000.0, 6223500.0)));
        assert!(!extent.contains(&(575500.0, 6224000.0)));
        Ok(())
    }

    #[test]
    fn test_wkt_from_name() -> Result<(), KnetError> {
        let wkt = wkt_from_name("1km_6223_575")?;
        let expected = [
            "POLYGON((575000.00 6223000.00",
            "575000.00 6224000.00",
            "576000.00 6224000.00",
            "576000.00 6223000.00",
            "575000.00 6223000.00))",
        ]
        .join(",");
        assert_eq!(wkt, expected);
        Ok(())
    }

    #[test]
    fn test_wkt_parses_to_tile_polygon() -> Result<(), KnetError> {
        let extent = extent_from_name("250m_622375_57550")?;
        let parsed: Wkt<f64> = Wkt::from_str(&extent.to_wkt())
            .map_err(|e| KnetError::InvalidTileName(e.to_string()))?;
        let polygon: Polygon<f64> = parsed
            .try_into()
            .map_err(|_| KnetError::InvalidTileName("not a polygon".to_string()))?;

        assert_eq!(polygon, extent.to_polygon());
        assert_eq!(polygon.exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_extent_to_rect() -> Result<(), KnetError> {
        let rect: Rect<f64> = extent_from_name("1km_6223_575")?.into();
        assert_eq!(rect.min(), coord! { x: 575000.0, y: 6223000.0 });
        assert_eq!(rect.width(), 1000.0);
        Ok(())
    }
}
