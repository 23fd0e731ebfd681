use crate::coord::Coordinate;
use crate::error::KnetError;
use crate::geom::TileExtent;
use crate::index::{
    IntoUnit, TileInfo, Unit, child_tiles, enlarge_ordinate, name_from_point, parent_tile,
    parse_name, reduce_ordinate, tile_to_index,
};
use geo_types::{Polygon, Rect};
use geojson::{Feature, JsonObject, JsonValue, feature::Id};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single square tile in the kvadratnet.
///
/// Each `Tile` carries its canonical name together with the unit and the UTM
/// coordinates of its lower-left corner.
///
/// # Example
///
/// ```
/// use kvadratnet_rs::{Tile, Unit};
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// let tile = Tile::from_point(&(575617.0, 6223777.0), Unit::OneKm)?;
/// assert_eq!(tile.name, "1km_6223_575");
///
/// let parent = tile.parent(None)?;
/// assert_eq!(parent.name, "10km_622_57");
///
/// // Square polygon for GIS operations
/// let polygon = tile.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Canonical tile name, e.g. `1km_6223_575`
    pub name: String,
    /// Tile unit
    pub unit: Unit,
    /// Northing of the lower-left corner in meters
    pub northing: i64,
    /// Easting of the lower-left corner in meters
    pub easting: i64,
}

impl Tile {
    pub(crate) fn new(info: TileInfo) -> Self {
        Self {
            name: info.name(),
            unit: info.unit,
            northing: info.northing,
            easting: info.easting,
        }
    }

    /// Create a Tile from a tile name, possibly embedded in other text.
    ///
    /// # Example
    /// ```
    /// use kvadratnet_rs::Tile;
    ///
    /// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
    /// let tile = Tile::from_name("dtm_1km_6223_575.tif")?;
    /// assert_eq!(tile.name, "1km_6223_575");
    /// assert_eq!(tile.easting, 575000);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_name(name: &str) -> Result<Self, KnetError> {
        Ok(Self::new(parse_name(name)?))
    }

    /// Create the Tile at `unit` containing a UTM coordinate.
    ///
    /// Accepts `(easting, northing)` tuples as well as `geo_types` points.
    pub fn from_point(coord: &impl Coordinate, unit: impl IntoUnit) -> Result<Self, KnetError> {
        let unit = unit.into_unit()?;
        let name = name_from_point(coord.northing(), coord.easting(), unit)?;

        Ok(Self {
            name,
            unit,
            northing: enlarge_ordinate(reduce_ordinate(coord.northing(), unit)?, unit)?,
            easting: enlarge_ordinate(reduce_ordinate(coord.easting(), unit)?, unit)?,
        })
    }

    /// Side length of the tile in meters.
    pub fn size(&self) -> i64 {
        self.unit.size()
    }

    pub fn info(&self) -> TileInfo {
        TileInfo {
            northing: self.northing,
            easting: self.easting,
            size: self.size(),
            unit: self.unit,
        }
    }

    pub fn extent(&self) -> TileExtent {
        TileExtent {
            min_easting: self.easting,
            min_northing: self.northing,
            max_easting: self.easting + self.size(),
            max_northing: self.northing + self.size(),
        }
    }

    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.extent().contains(coord)
    }

    pub fn to_rect(&self) -> Rect<f64> {
        self.extent().to_rect()
    }

    /// Converts this tile to a square polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.extent().to_polygon()
    }

    pub fn to_wkt(&self) -> String {
        self.extent().to_wkt()
    }

    /// Converts this tile to a GeoJSON feature with `name` and `unit` properties.
    pub fn to_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), JsonValue::from(self.name.clone()));
        properties.insert("unit".to_string(), JsonValue::from(self.unit.as_str()));

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.to_polygon())),
            id: Some(Id::String(self.name.clone())),
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// The tile at `unit` containing this tile, or the next coarser one.
    pub fn parent(&self, unit: Option<Unit>) -> Result<Self, KnetError> {
        Self::from_name(&parent_tile(&self.name, unit)?)
    }

    /// The tiles at the finer `unit` whose lower-left corner lies in this tile.
    pub fn children(&self, unit: impl IntoUnit) -> Result<Vec<Self>, KnetError> {
        child_tiles(&self.name, unit)?
            .iter()
            .map(|name| Self::from_name(name))
            .collect()
    }

    /// `(row, col)` of this tile relative to an origin, see [`tile_to_index`].
    pub fn index_from(
        &self,
        northing_origin: f64,
        easting_origin: f64,
    ) -> Result<(i64, i64), KnetError> {
        tile_to_index(&self.name, northing_origin, easting_origin)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Tile {
    type Err = KnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
