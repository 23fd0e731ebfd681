//! # kvadratnet-rs
//!
//! Naming, parsing and hierarchy of the Danish square tile grid
//! ("kvadratnet") in ETRS89 / UTM zone 32N.
//!
//! There are currently three main entry points.
//!
//! ### 1. Free functions on tile names
//!
//! ```
//! use kvadratnet_rs::{Unit, name_from_point, parent_tile, parse_name};
//!
//! # fn main() -> Result<(), kvadratnet_rs::KnetError> {
//! let name = name_from_point(6223777.0, 575617.0, Unit::OneKm)?;
//! assert_eq!(name, "1km_6223_575");
//!
//! let info = parse_name("prefix_1km_6223_575.tif")?;
//! assert_eq!((info.northing, info.easting), (6223000, 575000));
//!
//! assert_eq!(parent_tile(&name, None)?, "10km_622_57");
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Tile` and `TileGrid`
//!
//! ```
//! use kvadratnet_rs::{TileGrid, Unit};
//! use geo_types::point;
//!
//! # fn main() -> Result<(), kvadratnet_rs::KnetError> {
//! let grid = TileGrid::from_extent(575000.0, 6223000.0, 577000.0, 6225000.0, Unit::OneKm)?;
//! assert_eq!(grid.len(), 4);
//!
//! let pt = point! { x: 576500.0, y: 6224500.0 };
//! if let Some(tile) = grid.get_tile_at(&pt) {
//!     assert_eq!(tile.name, "1km_6224_576");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. File utilities
//!
//! Files with tile names can be renamed, sorted into a folder tree or listed
//! by their parent tiles:
//!
//! ```no_run
//! use kvadratnet_rs::{OrganizeConfig, Unit, organize_files};
//!
//! let config = OrganizeConfig::new([Unit::HundredKm, Unit::TenKm]).root("tiles");
//! organize_files(&["dtm_1km_6223_575.tif"], &config).unwrap();
//! ```
//!

pub mod coord;
pub mod error;
pub mod geom;
pub mod grid;
pub mod index;
pub mod io;
pub mod tile;

pub use coord::Coordinate;
pub use error::KnetError;
pub use geom::{
    TileExtent, extent_from_name, parse_area, parse_geojson, parse_geometry, parse_wkt,
    wkt_from_name,
};
pub use grid::{MAX_GRID_TILES, TileGrid};
pub use index::{
    IntoUnit, TileInfo, Unit, child_tiles, enlarge_ordinate, index_to_tile, name_from_point,
    parent_tile, parse_name, reduce_ordinate, tile_name, tile_to_index, validate_name,
    validate_name_with_units,
};
pub use io::{
    OrganizeConfig, OrganizeReport, ParentList, RenameConfig, RenameReport, list_parents,
    organize_files, parents_of, rename_files, renamed_path, tile_folder,
};
pub use tile::Tile;

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Rect, coord, point};

    #[test]
    fn test_end_to_end_workflow() -> Result<(), KnetError> {
        let grid = TileGrid::from_extent(575000.0, 6223000.0, 577000.0, 6225000.0, Unit::OneKm)?;

        assert!(!grid.is_empty());
        assert_eq!(grid.unit(), Unit::OneKm);

        let pt = point! { x: 576500.0, y: 6224500.0 };
        let tile = grid.get_tile_at(&pt);
        assert!(tile.is_some());

        if let Some(tile) = tile {
            let info = parse_name(&tile.name)?;
            assert_eq!(info.unit, Unit::OneKm);
            assert_eq!(info.size, 1000);

            let polygon = tile.to_polygon();
            assert_eq!(polygon.exterior().coords().count(), 5);
        }
        Ok(())
    }

    #[test]
    fn test_using_geo_types_macros() -> Result<(), KnetError> {
        let rect = Rect::new(
            coord! { x: 575000.0, y: 6223000.0 },
            coord! { x: 576000.0, y: 6224000.0 },
        );
        let grid = TileGrid::from_rect(&rect, Unit::TwoFifty)?;
        assert_eq!(grid.len(), 16);
        Ok(())
    }

    #[test]
    fn test_tile_consistency_with_grid() -> Result<(), KnetError> {
        let tile_direct = Tile::from_point(&(575617.0, 6223777.0), Unit::OneKm)?;

        let grid = TileGrid::from_extent(575000.0, 6223000.0, 577000.0, 6225000.0, Unit::OneKm)?;
        let pt = point! { x: 575617.0, y: 6223777.0 };
        let tile_from_grid = grid.get_tile_at(&pt);

        assert_eq!(Some(&tile_direct), tile_from_grid);
        Ok(())
    }

    #[test]
    fn test_hierarchy_walk() -> Result<(), KnetError> {
        let mut name = name_from_point(6223777.0, 575617.0, Unit::Hundred)?;
        let mut seen = vec![name.clone()];
        while let Ok(parent) = parent_tile(&name, None) {
            seen.push(parent.clone());
            name = parent;
        }

        assert_eq!(
            seen,
            vec![
                "100m_62237_5756",
                "250m_622350_57550",
                "1km_6223_575",
                "10km_622_57",
                "50km_620_55",
                "100km_62_5",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_index_grid_roundtrip() -> Result<(), KnetError> {
        let grid = TileGrid::from_extent(575000.0, 6223000.0, 577000.0, 6225000.0, Unit::OneKm)?;
        for tile in grid.iter() {
            let (row, col) = tile_to_index(&tile.name, 6225000.0, 575000.0)?;
            assert_eq!(
                index_to_tile(row, col, 6225000.0, 575000.0, Unit::OneKm)?,
                tile.name
            );
        }
        Ok(())
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        fn any_unit() -> impl Strategy<Value = Unit> {
            prop::sample::select(Unit::ALL.to_vec())
        }

        /// Child/parent unit pairs whose grids nest. 100m tiles straddle 250m
        /// tile boundaries.
        fn nesting_pair() -> impl Strategy<Value = (Unit, Unit)> {
            let pairs: Vec<(Unit, Unit)> = Unit::ALL
                .into_iter()
                .flat_map(|child| Unit::ALL.into_iter().map(move |parent| (child, parent)))
                .filter(|&(child, parent)| {
                    child < parent && (child, parent) != (Unit::Hundred, Unit::TwoFifty)
                })
                .collect();
            prop::sample::select(pairs)
        }

        proptest! {
            #[test]
            fn point_lies_in_its_tile(
                n in 1_000_000.0f64..9_999_999.0,
                e in 100_000.0f64..999_999.0,
                unit in any_unit(),
            ) {
                let name = name_from_point(n, e, unit).unwrap();
                let extent = extent_from_name(&name).unwrap();
                prop_assert!(extent.contains(&(e, n)), "{} does not contain ({}, {})", name, e, n);
            }

            #[test]
            fn parent_extent_contains_child(
                n in 1_000_000.0f64..9_999_999.0,
                e in 100_000.0f64..999_999.0,
                (child, parent) in nesting_pair(),
            ) {
                let name = name_from_point(n, e, child).unwrap();
                let parent_name = parent_tile(&name, Some(parent)).unwrap();
                let outer = extent_from_name(&parent_name).unwrap();
                let inner = extent_from_name(&name).unwrap();
                prop_assert!(outer.contains_extent(&inner), "{} not in {}", name, parent_name);
            }

            #[test]
            fn parent_of_point_tile_is_point_tile(
                n in 1_000_000.0f64..9_999_999.0,
                e in 100_000.0f64..999_999.0,
            ) {
                let small = name_from_point(n, e, Unit::Hundred).unwrap();
                prop_assert_eq!(
                    parent_tile(&small, Some(Unit::TenKm)).unwrap(),
                    name_from_point(n, e, Unit::TenKm).unwrap()
                );
            }

            #[test]
            fn extracted_names_are_strictly_valid(
                n in 1_000_000.0f64..9_999_999.0,
                e in 100_000.0f64..999_999.0,
                unit in any_unit(),
                prefix in "[a-z]{0,8}_",
                postfix in "\\.[a-z]{3}",
            ) {
                let name = name_from_point(n, e, unit).unwrap();
                let found = tile_name(&format!("{}{}{}", prefix, name, postfix)).unwrap();
                prop_assert!(validate_name(&found, true));
                prop_assert_eq!(found, name);
            }
        }
    }
}
