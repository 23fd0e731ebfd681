use crate::error::KnetError;
use crate::index::ordinate::{enlarge_ordinate, reduce_ordinate};
use crate::index::unit::{IntoUnit, Unit};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Parsed tile name: full UTM coordinates of the lower-left corner, tile size and unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileInfo {
    pub northing: i64,
    pub easting: i64,
    pub size: i64,
    pub unit: Unit,
}

impl TileInfo {
    /// Renders the canonical tile name, e.g. `1km_6223_575`.
    pub fn name(&self) -> String {
        format_name(
            self.unit,
            self.northing / self.unit.factor(),
            self.easting / self.unit.factor(),
        )
    }
}

fn format_name(unit: Unit, northing: i64, easting: i64) -> String {
    format!("{}_{}_{}", unit, northing, easting)
}

fn compile(strict: bool) -> Vec<Regex> {
    Unit::ALL
        .iter()
        .map(|unit| {
            let expr = if strict {
                format!("^{}$", unit.pattern())
            } else {
                unit.pattern().to_string()
            };
            Regex::new(&expr).expect("Valid tile name pattern")
        })
        .collect()
}

/// Compiled name pattern for `unit`.
///
/// Loose patterns match anywhere in a string, strict ones only the whole string.
fn name_pattern(unit: Unit, strict: bool) -> &'static Regex {
    static LOOSE: OnceLock<Vec<Regex>> = OnceLock::new();
    static STRICT: OnceLock<Vec<Regex>> = OnceLock::new();

    let patterns = if strict {
        STRICT.get_or_init(|| compile(true))
    } else {
        LOOSE.get_or_init(|| compile(false))
    };
    &patterns[unit.position()]
}

/// Returns the name of the tile at `unit` containing the point.
///
/// Ordinates are not zero-padded, so points outside the usual UTM range give
/// names that do not pass [`validate_name`].
///
/// # Example
/// ```
/// use kvadratnet_rs::name_from_point;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// assert_eq!(name_from_point(6223777.0, 575617.0, "1km")?, "1km_6223_575");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`KnetError::InvalidUnit`] - `unit` is not a tile unit
/// - [`KnetError::InvalidCoordinate`] - northing or easting is negative, not
///   finite, or too large for an integer tile ordinate
pub fn name_from_point(
    northing: f64,
    easting: f64,
    unit: impl IntoUnit,
) -> Result<String, KnetError> {
    let unit = unit.into_unit()?;

    let invalid = || KnetError::InvalidCoordinate { northing, easting };
    if !northing.is_finite() || !easting.is_finite() || northing < 0.0 || easting < 0.0 {
        return Err(invalid());
    }

    let reduced_northing = reduce_ordinate(northing, unit).map_err(|_| invalid())?;
    let reduced_easting = reduce_ordinate(easting, unit).map_err(|_| invalid())?;
    Ok(format_name(unit, reduced_northing, reduced_easting))
}

/// Checks whether `name` contains a tile name of any unit.
///
/// With `strict` the whole string must be a tile name, otherwise the name may
/// be embedded in other text, e.g. `dtm_1km_6223_575.tif`.
pub fn validate_name(name: &str, strict: bool) -> bool {
    Unit::ALL
        .into_iter()
        .any(|unit| name_pattern(unit, strict).is_match(name))
}

/// Checks whether `name` is a tile name of one of `units`.
///
/// # Example
/// ```
/// use kvadratnet_rs::validate_name_with_units;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// assert!(validate_name_with_units("1km_2342_523", &["1km", "250m"], true)?);
/// assert!(!validate_name_with_units("1km_2342_523", &["10km", "250m"], true)?);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`KnetError::InvalidUnit`] - any of `units` is not a tile unit
pub fn validate_name_with_units<U: IntoUnit + Clone>(
    name: &str,
    units: &[U],
    strict: bool,
) -> Result<bool, KnetError> {
    let units = units
        .iter()
        .cloned()
        .map(IntoUnit::into_unit)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(units
        .into_iter()
        .any(|unit| name_pattern(unit, strict).is_match(name)))
}

/// Extracts a tile name from arbitrary text, typically a file name.
///
/// Units are tried from smallest to largest and the first match of the first
/// matching unit is returned.
///
/// # Example
/// ```
/// use kvadratnet_rs::tile_name;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// assert_eq!(tile_name("dtm_1km_5232_624.tif")?, "1km_5232_624");
/// # Ok(())
/// # }
/// ```
pub fn tile_name(text: &str) -> Result<String, KnetError> {
    Unit::ALL
        .into_iter()
        .find_map(|unit| name_pattern(unit, false).find(text))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| KnetError::NoTileNameFound(text.to_string()))
}

/// Converts a tile name into northing, easting, tile size and unit.
///
/// Accepts bare names (`1km_6234_234`) as well as names embedded in other
/// text (`punktsky_1km_6234_234.laz`).
///
/// # Errors
///
/// - [`KnetError::InvalidTileName`] - no valid tile name in `name`
pub fn parse_name(name: &str) -> Result<TileInfo, KnetError> {
    let canonical = if validate_name(name, true) {
        name.to_string()
    } else {
        tile_name(name).map_err(|_| KnetError::InvalidTileName(name.to_string()))?
    };

    let invalid = || KnetError::InvalidTileName(name.to_string());
    let mut parts = canonical.split('_');
    let (Some(unit), Some(northing), Some(easting), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let unit: Unit = unit.parse().map_err(|_| invalid())?;
    let northing: i64 = northing.parse().map_err(|_| invalid())?;
    let easting: i64 = easting.parse().map_err(|_| invalid())?;

    Ok(TileInfo {
        northing: enlarge_ordinate(northing, unit)?,
        easting: enlarge_ordinate(easting, unit)?,
        size: unit.size(),
        unit,
    })
}
