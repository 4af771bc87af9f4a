use roxmltree::Node;
use serde_json::json;

use crate::error::FormatError;

use super::{Geometry, GeometryKind};

/// Extracts a geometry from a feed item using the simple GeoRSS vocabulary
/// (`point`, `line`, `polygon`, `box`, any namespace) with a W3C
/// `geo:lat`/`geo:long` fallback.
///
/// `Ok(None)` means the item simply carries no geometry; an `Err` marks the
/// item malformed.
pub(crate) fn from_item(item: Node<'_, '_>) -> Result<Option<Geometry>, FormatError> {
    if let Some(text) = child_text(item, "point") {
        let pairs = lat_lon_pairs(text)?;
        let first = pairs
            .first()
            .ok_or_else(|| FormatError::MalformedCoordinates(text.to_owned()))?;
        return Ok(Some(Geometry::new(GeometryKind::Point, json!(first))));
    }
    if let Some(text) = child_text(item, "line") {
        let pairs = lat_lon_pairs(text)?;
        return Ok(Some(Geometry::new(GeometryKind::LineString, json!(pairs))));
    }
    if let Some(text) = child_text(item, "polygon") {
        let pairs = lat_lon_pairs(text)?;
        return Ok(Some(Geometry::new(GeometryKind::Polygon, json!([pairs]))));
    }
    if let Some(text) = child_text(item, "box") {
        let pairs = lat_lon_pairs(text)?;
        if pairs.len() != 2 {
            return Err(FormatError::MalformedCoordinates(text.to_owned()));
        }
        return Ok(Some(Geometry::new(GeometryKind::Box, json!(pairs))));
    }
    if let (Some(lat), Some(lon)) = (child_text(item, "lat"), child_text(item, "long")) {
        let lat = parse_number(lat)?;
        let lon = parse_number(lon)?;
        return Ok(Some(Geometry::new(GeometryKind::Point, json!([lon, lat]))));
    }
    Ok(None)
}

/// First matching direct child element, any namespace, non-empty text.
pub(crate) fn child_text<'doc>(item: Node<'doc, '_>, local_name: &str) -> Option<&'doc str> {
    item.children()
        .find(|node| node.is_element() && node.tag_name().name() == local_name)
        .and_then(|node| node.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Parses whitespace-separated "lat lon lat lon ..." text into
/// longitude-first coordinate pairs.
fn lat_lon_pairs(text: &str) -> Result<Vec<[f64; 2]>, FormatError> {
    let mut numbers = Vec::new();
    for token in text.split_whitespace() {
        numbers.push(parse_number(token)?);
    }
    if numbers.is_empty() || numbers.len() % 2 != 0 {
        return Err(FormatError::MalformedCoordinates(text.to_owned()));
    }
    let pairs = numbers
        .chunks_exact(2)
        .filter_map(|chunk| match (chunk.first(), chunk.get(1)) {
            (Some(&lat), Some(&lon)) => Some([lon, lat]),
            _ => None,
        })
        .collect();
    Ok(pairs)
}

fn parse_number(token: &str) -> Result<f64, FormatError> {
    token
        .parse::<f64>()
        .map_err(|err| FormatError::MalformedCoordinates(format!("{}: {}", token, err)))
}
