use geo_types::{Coord, Point};

/// Trait for types that can provide projected x/y coordinates.
///
/// `x` is the easting and `y` the northing, in meters. Implemented for
/// `(f64, f64)` tuples, `geo_types::Point<f64>` and `geo_types::Coord<f64>`,
/// so functions can accept any of them.
pub trait Coordinate {
    /// Returns the x-coordinate (easting).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (northing).
    fn y(&self) -> f64;

    fn easting(&self) -> f64 {
        self.x()
    }

    fn northing(&self) -> f64 {
        self.y()
    }
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}
