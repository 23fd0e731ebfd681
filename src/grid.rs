use crate::coord::Coordinate;
use crate::error::KnetError;
use crate::index::{IntoUnit, Unit, to_cell};
use crate::tile::Tile;
use geo::{BoundingRect, Intersects};
use geo_types::{Geometry, Polygon, Rect};
use geojson::FeatureCollection;

/// All tiles of one unit covering an area.
///
/// # Example
///
/// ```
/// use kvadratnet_rs::{TileGrid, Unit};
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// let grid = TileGrid::from_extent(575000.0, 6223000.0, 577000.0, 6224500.0, Unit::OneKm)?;
/// assert_eq!(grid.len(), 4);
///
/// if let Some(tile) = grid.get_tile_at(&(576500.0, 6224200.0)) {
///     assert_eq!(tile.name, "1km_6224_576");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    unit: Unit,
}

/// Largest number of tiles a [`TileGrid`] will hold, a little more than the
/// 100m tiles covering Denmark.
pub const MAX_GRID_TILES: u64 = 25_000_000;

impl TileGrid {
    /// Tiles whose extent intersects the box, south to north then west to east.
    ///
    /// A degenerate box gives the single tile containing it.
    ///
    /// # Errors
    ///
    /// - [`KnetError::InvalidUnit`] - `unit` is not a tile unit
    /// - [`KnetError::InvalidCoordinate`] - a bound is negative or not finite
    /// - [`KnetError::GridTooLarge`] - the box needs more than [`MAX_GRID_TILES`] tiles
    pub fn from_extent(
        min_easting: f64,
        min_northing: f64,
        max_easting: f64,
        max_northing: f64,
        unit: impl IntoUnit,
    ) -> Result<Self, KnetError> {
        let unit = unit.into_unit()?;
        let size = unit.size();

        for (northing, easting) in [(min_northing, min_easting), (max_northing, max_easting)] {
            if !northing.is_finite() || !easting.is_finite() || northing < 0.0 || easting < 0.0 {
                return Err(KnetError::InvalidCoordinate { northing, easting });
            }
        }
        let (min_easting, max_easting) =
            (min_easting.min(max_easting), min_easting.max(max_easting));
        let (min_northing, max_northing) =
            (min_northing.min(max_northing), min_northing.max(max_northing));

        let out_of_range = || KnetError::InvalidCoordinate {
            northing: max_northing,
            easting: max_easting,
        };
        let (first_col, cols) =
            tile_span(min_easting, max_easting, size).ok_or_else(out_of_range)?;
        let (first_row, rows) =
            tile_span(min_northing, max_northing, size).ok_or_else(out_of_range)?;

        let count = (cols as u64).saturating_mul(rows as u64);
        if count > MAX_GRID_TILES {
            return Err(KnetError::GridTooLarge {
                tiles: count,
                limit: MAX_GRID_TILES,
            });
        }

        let mut tiles = Vec::with_capacity(count as usize);
        for row in first_row..first_row + rows {
            for col in first_col..first_col + cols {
                let corner = ((col * size) as f64, (row * size) as f64);
                tiles.push(Tile::from_point(&corner, unit)?);
            }
        }

        Ok(Self { tiles, unit })
    }

    pub fn from_rect(rect: &Rect<f64>, unit: impl IntoUnit) -> Result<Self, KnetError> {
        Self::from_extent(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
            unit,
        )
    }

    /// Tiles intersecting a geometry. Empty geometries give an empty grid.
    pub fn from_geometry(geometry: &Geometry<f64>, unit: impl IntoUnit) -> Result<Self, KnetError> {
        let unit = unit.into_unit()?;
        let Some(rect) = geometry.bounding_rect() else {
            return Ok(Self {
                tiles: Vec::new(),
                unit,
            });
        };

        let mut grid = Self::from_rect(&rect, unit)?;
        grid.tiles
            .retain(|tile| tile.to_polygon().intersects(geometry));
        Ok(grid)
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn get_tile_at(&self, coord: &impl Coordinate) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.contains(coord))
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.tiles.iter().map(|tile| tile.to_polygon()).collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&Tile>
    where
        F: Fn(&Tile) -> bool,
    {
        self.tiles.iter().filter(|tile| predicate(tile)).collect()
    }

    /// GeoJSON tile index with one feature per tile.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.tiles.iter().map(|tile| tile.to_feature()).collect(),
            foreign_members: None,
        }
    }
}

/// First cell and number of cells covering `[min, max)` along one axis, at
/// least one. `None` if a corner does not fit `i64`.
fn tile_span(min: f64, max: f64, size: i64) -> Option<(i64, i64)> {
    let first = to_cell((min / size as f64).floor())?;
    let end = to_cell((max / size as f64).ceil())?;
    let count = (end - first).max(1);
    first.checked_add(count)?.checked_mul(size)?;
    Some((first, count))
}
