use crate::error::KnetError;
use geo::CoordsIter;
use geo_types::{Geometry, GeometryCollection, Rect, coord};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

fn parse_error(msg: impl ToString) -> KnetError {
    KnetError::GeometryParseError(msg.to_string())
}

/// Parses an area description into a geometry.
///
/// Accepts a bounding box `min_e,min_n,max_e,max_n` (commas or whitespace)
/// or anything [`parse_geometry`] accepts.
///
/// # Example
/// ```
/// use kvadratnet_rs::parse_area;
/// use geo_types::Geometry;
///
/// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
/// assert!(matches!(parse_area("575000 6223000 577000 6224500")?, Geometry::Rect(_)));
/// assert!(parse_area("575000,6223000,inf,6224000").is_err());
/// # Ok(())
/// # }
/// ```
pub fn parse_area(s: &str) -> Result<Geometry<f64>, KnetError> {
    let trimmed = s.trim();
    match parse_bbox(trimmed)? {
        Some(rect) => Ok(Geometry::Rect(rect)),
        None => parse_geometry(trimmed),
    }
}

/// `Ok(None)` if `s` is not a list of four numbers.
fn parse_bbox(s: &str) -> Result<Option<Rect<f64>>, KnetError> {
    let values: Option<Vec<f64>> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|v| !v.is_empty())
        .map(|v| v.parse().ok())
        .collect();
    let Some([min_x, min_y, max_x, max_y]) =
        values.and_then(|v| <[f64; 4]>::try_from(v.as_slice()).ok())
    else {
        return Ok(None);
    };

    if [min_x, min_y, max_x, max_y].iter().any(|v| !v.is_finite()) {
        return Err(parse_error(format!("Bounding box is not finite: {}", s)));
    }
    Ok(Some(Rect::new(
        coord! { x: min_x, y: min_y },
        coord! { x: max_x, y: max_y },
    )))
}

/// Parses a WKT or GeoJSON geometry. GeoJSON is detected by a leading `{`.
///
/// Geometries with infinite or NaN coordinates are rejected.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, KnetError> {
    let trimmed = s.trim();
    let geometry = if trimmed.starts_with('{') {
        parse_geojson(trimmed)?
    } else {
        parse_wkt(trimmed)?
    };
    ensure_finite(geometry)
}

fn ensure_finite(geometry: Geometry<f64>) -> Result<Geometry<f64>, KnetError> {
    if geometry
        .coords_iter()
        .all(|c| c.x.is_finite() && c.y.is_finite())
    {
        Ok(geometry)
    } else {
        Err(parse_error("Geometry has non-finite coordinates"))
    }
}

/// Parses a GeoJSON geometry, feature or feature collection.
///
/// A collection becomes a `GeometryCollection` of its feature geometries;
/// features without a geometry are left out.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, KnetError> {
    let geojson: GeoJson = s.parse().map_err(|e: geojson::Error| parse_error(e))?;

    let geometries = match geojson {
        GeoJson::Geometry(geometry) => vec![geometry],
        GeoJson::Feature(feature) => {
            vec![feature.geometry.ok_or_else(|| parse_error("Feature has no geometry"))?]
        }
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect(),
    };

    let mut geometries = geometries
        .into_iter()
        .map(Geometry::<f64>::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(parse_error)?;

    match geometries.len() {
        1 => Ok(geometries.remove(0)),
        _ => Ok(Geometry::GeometryCollection(GeometryCollection(geometries))),
    }
}

/// Parses a WKT geometry.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, KnetError> {
    let wkt = Wkt::<f64>::from_str(s).map_err(parse_error)?;
    Geometry::try_from(wkt).map_err(|_| parse_error(format!("Unsupported WKT geometry: {}", s)))
}
