use crate::error::KnetError;
use crate::index::name::{name_from_point, parse_name};
use crate::index::unit::{IntoUnit, Unit};

/// Returns the tile at `parent_unit` containing `name`.
///
/// Without a `parent_unit` the next coarser unit is used.
///
/// # Example
/// ```
/// use kvadratnet_rs::{Unit, parent_tile};
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// assert_eq!(parent_tile("1km_6223_575", None)?, "10km_622_57");
/// assert_eq!(parent_tile("1km_6223_575", Some(Unit::HundredKm))?, "100km_62_5");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`KnetError::InvalidTileName`] - `name` is not a tile name
/// - [`KnetError::NoParentTile`] - `name` is a `100km` tile and no unit was given
/// - [`KnetError::InvalidHierarchy`] - `parent_unit` is not coarser than the tile
pub fn parent_tile(name: &str, parent_unit: Option<Unit>) -> Result<String, KnetError> {
    let tile = parse_name(name)?;

    let parent_unit = match parent_unit {
        Some(unit) if tile.unit.size() >= unit.size() => {
            return Err(KnetError::InvalidHierarchy {
                child: tile.unit,
                parent: unit,
            });
        }
        Some(unit) => unit,
        None => tile
            .unit
            .next_larger()
            .ok_or_else(|| KnetError::NoParentTile(name.to_string()))?,
    };

    name_from_point(tile.northing as f64, tile.easting as f64, parent_unit)
}

/// Returns the tiles at `child_unit` whose lower-left corner lies in `name`.
///
/// Tiles are ordered south to north, then west to east. `100m` tiles do not nest
/// in `250m` tiles; the children of a `250m` tile are exactly the `100m` tiles
/// whose [`parent_tile`] it is.
///
/// # Errors
///
/// - [`KnetError::InvalidTileName`] - `name` is not a tile name
/// - [`KnetError::InvalidUnit`] - `child_unit` is not a tile unit
/// - [`KnetError::InvalidHierarchy`] - `child_unit` is not finer than the tile
pub fn child_tiles(name: &str, child_unit: impl IntoUnit) -> Result<Vec<String>, KnetError> {
    let tile = parse_name(name)?;
    let unit = child_unit.into_unit()?;

    if unit.size() >= tile.size {
        return Err(KnetError::InvalidHierarchy {
            child: unit,
            parent: tile.unit,
        });
    }

    let size = unit.size();
    let first_corner = |min: i64| (min + size - 1) / size * size;
    let per_axis = (tile.size / size + 1) as usize;

    let northings = (first_corner(tile.northing)..tile.northing + tile.size).step_by(size as usize);
    let eastings = (first_corner(tile.easting)..tile.easting + tile.size).step_by(size as usize);

    let mut children = Vec::with_capacity(per_axis * per_axis);
    for northing in northings {
        for easting in eastings.clone() {
            children.push(name_from_point(northing as f64, easting as f64, unit)?);
        }
    }

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_tile() -> Result<(), KnetError> {
        assert_eq!(parent_tile("1km_6223_575", Some(Unit::TenKm))?, "10km_622_57");
        assert_eq!(parent_tile("1km_6223_575", None)?, "10km_622_57");
        assert_eq!(
            parent_tile("100m_62237_5756", Some(Unit::TwoFifty))?,
            "250m_622350_57550"
        );
        assert_eq!(parent_tile("10km_622_57", None)?, "50km_620_55");
        assert_eq!(parent_tile("dtm_50km_620_55.tif", None)?, "100km_62_5");
        Ok(())
    }

    #[test]
    fn test_parent_tile_of_largest_unit() {
        assert_eq!(
            parent_tile("100km_62_5", None),
            Err(KnetError::NoParentTile("100km_62_5".to_string()))
        );
    }

    #[test]
    fn test_parent_tile_must_be_coarser() {
        assert_eq!(
            parent_tile("10km_423_23", Some(Unit::OneKm)),
            Err(KnetError::InvalidHierarchy {
                child: Unit::TenKm,
                parent: Unit::OneKm,
            })
        );
        assert!(matches!(
            parent_tile("1km_6223_575", Some(Unit::OneKm)),
            Err(KnetError::InvalidHierarchy { .. })
        ));
    }

    #[test]
    fn test_parent_tile_invalid_name() {
        assert!(matches!(
            parent_tile("BadName", None),
            Err(KnetError::InvalidTileName(_))
        ));
    }

    #[test]
    fn test_child_tiles_aligned() -> Result<(), KnetError> {
        let children = child_tiles("10km_622_57", "1km")?;
        assert_eq!(children.len(), 100);
        assert_eq!(children[0], "1km_6220_570");
        assert_eq!(children[1], "1km_6220_571");
        assert_eq!(children[99], "1km_6229_579");

        assert_eq!(child_tiles("1km_6223_575", Unit::TwoFifty)?.len(), 16);
        assert_eq!(child_tiles("100km_62_5", Unit::FiftyKm)?.len(), 4);
        Ok(())
    }

    #[test]
    fn test_child_tiles_have_tile_as_parent() -> Result<(), KnetError> {
        for (parent, child_unit) in [
            ("250m_622350_57550", Unit::Hundred),
            ("250m_622375_57575", Unit::Hundred),
            ("1km_6223_575", Unit::Hundred),
            ("1km_6223_575", Unit::TwoFifty),
            ("50km_620_55", Unit::OneKm),
            ("50km_620_55", Unit::TenKm),
        ] {
            let parent_unit = parse_name(parent)?.unit;
            for child in child_tiles(parent, child_unit)? {
                assert_eq!(parent_tile(&child, Some(parent_unit))?, parent);
            }
        }
        Ok(())
    }

    #[test]
    fn test_child_tiles_of_250m() -> Result<(), KnetError> {
        // 250m tiles hold either two or three 100m corners per axis.
        assert_eq!(child_tiles("250m_622350_57550", "100m")?.len(), 9);
        assert_eq!(child_tiles("250m_622375_57575", "100m")?.len(), 4);
        Ok(())
    }

    #[test]
    fn test_child_tiles_must_be_finer() {
        assert!(matches!(
            child_tiles("1km_6223_575", Unit::TenKm),
            Err(KnetError::InvalidHierarchy { .. })
        ));
        assert!(matches!(
            child_tiles("1km_6223_575", "1km"),
            Err(KnetError::InvalidHierarchy { .. })
        ));
        assert!(child_tiles("1km_6223_575", "2km").is_err());
    }
}
