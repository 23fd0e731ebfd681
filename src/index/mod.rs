mod hierarchy;
mod indexing;
mod name;
mod ordinate;
mod unit;

pub use hierarchy::{child_tiles, parent_tile};
pub use indexing::{index_to_tile, tile_to_index};
pub use name::{
    TileInfo, name_from_point, parse_name, tile_name, validate_name, validate_name_with_units,
};
pub use ordinate::{enlarge_ordinate, reduce_ordinate};
pub(crate) use ordinate::to_cell;
pub use unit::{IntoUnit, Unit};
