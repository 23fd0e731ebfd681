use crate::error::KnetError;
use crate::index::unit::IntoUnit;

/// Reduces a UTM ordinate to the tile ordinate of the tile containing it.
///
/// Power-of-ten units floor-divide by the tile size. `250m` and `50km` floor-divide
/// and then scale back up by `size / factor` (25 and 5), which keeps their
/// ordinates on the digit grid of `100m`/`10km`.
///
/// # Example
/// ```
/// use kvadratnet_rs::reduce_ordinate;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// assert_eq!(reduce_ordinate(6432523.0, "1km")?, 6432);
/// assert_eq!(reduce_ordinate(575617.0, "250m")?, 57550);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`KnetError::InvalidUnit`] - `unit` is not a tile unit
/// - [`KnetError::OrdinateOutOfRange`] - `coordinate` is not finite or its tile
///   ordinate overflows `i64`
pub fn reduce_ordinate(coordinate: f64, unit: impl IntoUnit) -> Result<i64, KnetError> {
    let unit = unit.into_unit()?;
    to_cell((coordinate / unit.size() as f64).floor())
        .and_then(|cells| cells.checked_mul(unit.size() / unit.factor()))
        .ok_or(KnetError::OrdinateOutOfRange(coordinate))
}

/// Enlarges a tile ordinate to the UTM ordinate of the tile's lower-left corner.
///
/// # Example
/// ```
/// use kvadratnet_rs::enlarge_ordinate;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// assert_eq!(enlarge_ordinate(6432, "1km")?, 6432000);
/// # Ok(())
/// # }
/// ```
pub fn enlarge_ordinate(ordinate: i64, unit: impl IntoUnit) -> Result<i64, KnetError> {
    let unit = unit.into_unit()?;
    ordinate
        .checked_mul(unit.factor())
        .ok_or(KnetError::OrdinateOutOfRange(ordinate as f64))
}

/// Converts a whole number of cells to `i64`, `None` if it is not finite or
/// does not fit.
pub(crate) fn to_cell(cells: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    (cells.is_finite() && cells >= i64::MIN as f64 && cells < i64::MAX as f64)
        .then_some(cells as i64)
}
