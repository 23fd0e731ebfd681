use crate::error::KnetError;
use crate::index::name::{name_from_point, parse_name};
use crate::index::ordinate::to_cell;
use crate::index::unit::IntoUnit;

/// Snaps `origin` to the nearest multiple of `size`.
fn snap_to_grid(origin: f64, size: i64) -> Option<i64> {
    to_cell((origin / size as f64).round())?.checked_mul(size)
}

/// Converts a tile name to `(row, col)` indices relative to an origin.
///
/// The origin is first rounded to the nearest tile corner. Columns grow to the
/// east and rows grow to the south, as in raster images, so tiles north or west
/// of the origin get negative indices.
///
/// # Example
/// ```
/// use kvadratnet_rs::tile_to_index;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// let (row, col) = tile_to_index("1km_6232_623", 6200000.0, 600000.0)?;
/// assert_eq!((row, col), (-32, 23));
/// # Ok(())
/// # }
/// ```
pub fn tile_to_index(
    name: &str,
    northing_origin: f64,
    easting_origin: f64,
) -> Result<(i64, i64), KnetError> {
    let tile = parse_name(name)?;
    let out_of_range = || KnetError::InvalidCoordinate {
        northing: northing_origin,
        easting: easting_origin,
    };

    let row = snap_to_grid(northing_origin, tile.size)
        .and_then(|n0| n0.checked_sub(tile.northing))
        .ok_or_else(out_of_range)?;
    let col = snap_to_grid(easting_origin, tile.size)
        .and_then(|e0| tile.easting.checked_sub(e0))
        .ok_or_else(out_of_range)?;

    Ok((row / tile.size, col / tile.size))
}

/// Converts `(row, col)` indices relative to an origin back to a tile name.
///
/// Inverse of [`tile_to_index`] for tiles of `unit`.
pub fn index_to_tile(
    row: i64,
    col: i64,
    northing_origin: f64,
    easting_origin: f64,
    unit: impl IntoUnit,
) -> Result<String, KnetError> {
    let unit = unit.into_unit()?;
    let size = unit.size();

    let northing = snap_to_grid(northing_origin, size)
        .zip(row.checked_mul(size))
        .and_then(|(n0, offset)| n0.checked_sub(offset));
    let easting = snap_to_grid(easting_origin, size)
        .zip(col.checked_mul(size))
        .and_then(|(e0, offset)| e0.checked_add(offset));

    let (Some(northing), Some(easting)) = (northing, easting) else {
        return Err(KnetError::InvalidCoordinate {
            northing: northing_origin,
            easting: easting_origin,
        });
    };
    name_from_point(northing as f64, easting as f64, unit)
}
