use crate::error::KnetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tile unit, i.e. the resolution of a kvadratnet tile.
///
/// Variants are declared from smallest to largest tile size, so the derived
/// ordering is the parent/child hierarchy: `100m < 250m < 1km < 10km < 50km < 100km`.
///
/// # Example
///
/// ```
/// use kvadratnet_rs::Unit;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// let unit: Unit = "1km".parse()?;
/// assert_eq!(unit.size(), 1000);
/// assert_eq!(unit.next_larger(), Some(Unit::TenKm));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "100m")]
    Hundred,
    #[serde(rename = "250m")]
    TwoFifty,
    #[serde(rename = "1km")]
    OneKm,
    #[serde(rename = "10km")]
    TenKm,
    #[serde(rename = "50km")]
    FiftyKm,
    #[serde(rename = "100km")]
    HundredKm,
}

impl Unit {
    /// All units, smallest first.
    pub const ALL: [Unit; 6] = [
        Unit::Hundred,
        Unit::TwoFifty,
        Unit::OneKm,
        Unit::TenKm,
        Unit::FiftyKm,
        Unit::HundredKm,
    ];

    /// The unit literal used in tile names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Unit::Hundred => "100m",
            Unit::TwoFifty => "250m",
            Unit::OneKm => "1km",
            Unit::TenKm => "10km",
            Unit::FiftyKm => "50km",
            Unit::HundredKm => "100km",
        }
    }

    /// Side length of a tile in meters.
    pub const fn size(self) -> i64 {
        match self {
            Unit::Hundred => 100,
            Unit::TwoFifty => 250,
            Unit::OneKm => 1_000,
            Unit::TenKm => 10_000,
            Unit::FiftyKm => 50_000,
            Unit::HundredKm => 100_000,
        }
    }

    /// Multiplier turning a tile ordinate back into a full coordinate.
    ///
    /// Smaller than `size` for `250m` and `50km`, whose ordinates are kept on
    /// the digit grid of the next power of ten.
    pub const fn factor(self) -> i64 {
        match self {
            Unit::Hundred => 100,
            Unit::TwoFifty => 10,
            Unit::OneKm => 1_000,
            Unit::TenKm => 10_000,
            Unit::FiftyKm => 10_000,
            Unit::HundredKm => 100_000,
        }
    }

    /// Fixed-width name pattern, `<unit>_<northing digits>_<easting digits>`.
    pub const fn pattern(self) -> &'static str {
        match self {
            Unit::Hundred => "100m_[0-9]{5}_[0-9]{4}",
            Unit::TwoFifty => "250m_[0-9]{6}_[0-9]{5}",
            Unit::OneKm => "1km_[0-9]{4}_[0-9]{3}",
            Unit::TenKm => "10km_[0-9]{3}_[0-9]{2}",
            Unit::FiftyKm => "50km_[0-9]{3}_[0-9]{2}",
            Unit::HundredKm => "100km_[0-9]{2}_[0-9]",
        }
    }

    /// Whether `size` is an exact power of ten.
    pub const fn is_decimal(self) -> bool {
        !matches!(self, Unit::TwoFifty | Unit::FiftyKm)
    }

    /// The next coarser unit, `None` for `100km`.
    pub fn next_larger(self) -> Option<Unit> {
        Unit::ALL.get(self.position() + 1).copied()
    }

    /// The next finer unit, `None` for `100m`.
    pub fn next_smaller(self) -> Option<Unit> {
        self.position().checked_sub(1).map(|i| Unit::ALL[i])
    }

    pub(crate) const fn position(self) -> usize {
        self as usize
    }

    /// Parses a list of unit literals separated by whitespace or commas,
    /// e.g. `"100km 10km"`.
    ///
    /// Fails on the first literal that is not a unit.
    pub fn parse_list(list: &str) -> Result<Vec<Unit>, KnetError> {
        list.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = KnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| KnetError::InvalidUnit(s.to_string()))
    }
}

impl TryFrom<&str> for Unit {
    type Error = KnetError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Trait for values that name a tile unit.
///
/// Implemented for [`Unit`] itself and for unit literals (`&str`, `String`),
/// so functions can take either. Literals that are not units fail with
/// [`KnetError::InvalidUnit`].
pub trait IntoUnit {
    fn into_unit(self) -> Result<Unit, KnetError>;
}

impl IntoUnit for Unit {
    fn into_unit(self) -> Result<Unit, KnetError> {
        Ok(self)
    }
}

impl IntoUnit for &str {
    fn into_unit(self) -> Result<Unit, KnetError> {
        self.parse()
    }
}

impl IntoUnit for String {
    fn into_unit(self) -> Result<Unit, KnetError> {
        self.parse()
    }
}

impl IntoUnit for &String {
    fn into_unit(self) -> Result<Unit, KnetError> {
        self.parse()
    }
}
