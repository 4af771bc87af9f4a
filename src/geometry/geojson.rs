use serde_json::Value;

use crate::error::FormatError;

use super::{Geometry, GeometryKind};

/// Structurally parses a GeoJSON geometry object.
///
/// # Errors
///
/// Returns a [`FormatError`] when the value is not an object, declares no or
/// an unknown `type`, or lacks its coordinate member (`geometries` for
/// collections, `coordinates` otherwise).
pub fn parse_geometry(value: &Value) -> Result<Geometry, FormatError> {
    let object = value.as_object().ok_or(FormatError::MissingGeometry)?;
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(FormatError::MissingType)?;
    let kind = GeometryKind::from_type_name(type_name)
        .ok_or_else(|| FormatError::UnknownGeometryType(type_name.to_owned()))?;

    let member = if kind == GeometryKind::GeometryCollection {
        "geometries"
    } else {
        "coordinates"
    };
    let coordinates = object
        .get(member)
        .filter(|value| value.is_array())
        .ok_or(FormatError::MissingCoordinates {
            kind: kind.as_str(),
            member,
        })?;

    if kind == GeometryKind::GeometryCollection {
        for child in coordinates.as_array().into_iter().flatten() {
            parse_geometry(child)?;
        }
    }

    Ok(Geometry::new(kind, coordinates.clone()))
}
