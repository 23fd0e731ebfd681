use crate::index::Unit;

/// Error type for kvadratnet-rs operations.
#[derive(Debug, PartialEq)]
pub enum KnetError {
    /// The unit literal is not one of `100m`, `250m`, `1km`, `10km`, `50km`, `100km`.
    InvalidUnit(String),
    /// Northing or easting is negative or not finite.
    InvalidCoordinate { northing: f64, easting: f64 },
    /// No tile name pattern appears anywhere in the scanned text.
    NoTileNameFound(String),
    /// The ordinate does not fit the integer tile grid.
    OrdinateOutOfRange(f64),
    /// A tile grid would hold more than `limit` tiles.
    GridTooLarge { tiles: u64, limit: u64 },
    /// The text is not a valid tile name.
    InvalidTileName(String),
    /// The tile is already at the coarsest unit.
    NoParentTile(String),
    /// The requested parent unit is not strictly coarser than the child unit.
    InvalidHierarchy { child: Unit, parent: Unit },
    /// Failed to parse an area from a bounding box, WKT or GeoJSON string.
    GeometryParseError(String),
    /// File system error raised while renaming or moving tiles.
    IoError(String),
}

impl std::fmt::Display for KnetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KnetError::InvalidUnit(u) => write!(f, "Tile unit not recognised: {}", u),
            KnetError::InvalidCoordinate { northing, easting } => write!(
                f,
                "Only finite, positive northing or easting accepted: ({}, {})",
                northing, easting
            ),
            KnetError::NoTileNameFound(s) => write!(f, "No tile name found in: {}", s),
            KnetError::OrdinateOutOfRange(v) => write!(f, "Ordinate out of range: {}", v),
            KnetError::GridTooLarge { tiles, limit } => {
                write!(f, "Grid of {} tiles exceeds the limit of {} tiles", tiles, limit)
            }
            KnetError::InvalidTileName(s) => write!(f, "Not a valid tile name: {}", s),
            KnetError::NoParentTile(s) => write!(f, "No parent tile for: {}", s),
            KnetError::InvalidHierarchy { child, parent } => {
                write!(f, "{} is not coarser than {}", parent, child)
            }
            KnetError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            KnetError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for KnetError {}
