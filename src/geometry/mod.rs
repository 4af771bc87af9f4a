//! Narrow seam to the geometry subsystem.
//!
//! The engine never computes on coordinates; geometries are carried as
//! opaque values for the rendering collaborator. Parsing here is structural
//! only: enough validation for the filtering layer to isolate malformed
//! records, nothing resembling full schema validation.
mod geojson;
pub(crate) mod georss;

use serde_json::Value;

use crate::error::FormatError;

pub use geojson::parse_geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Box,
}

impl GeometryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
            GeometryKind::Box => "Box",
        }
    }

    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(GeometryKind::Point),
            "MultiPoint" => Some(GeometryKind::MultiPoint),
            "LineString" => Some(GeometryKind::LineString),
            "MultiLineString" => Some(GeometryKind::MultiLineString),
            "Polygon" => Some(GeometryKind::Polygon),
            "MultiPolygon" => Some(GeometryKind::MultiPolygon),
            "GeometryCollection" => Some(GeometryKind::GeometryCollection),
            "Box" => Some(GeometryKind::Box),
            _ => None,
        }
    }
}

/// An opaque geometry: its kind plus the raw coordinate payload
/// (`geometries` members for collections).
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    coordinates: Value,
}

impl Geometry {
    pub(crate) const fn new(kind: GeometryKind, coordinates: Value) -> Self {
        Self { kind, coordinates }
    }

    #[must_use]
    pub const fn kind(&self) -> GeometryKind {
        self.kind
    }

    #[must_use]
    pub const fn coordinates(&self) -> &Value {
        &self.coordinates
    }
}

/// A bounding box in `[left, bottom, right, top]` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Bounds {
    /// Builds bounds from a GeoJSON `bbox` array.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MalformedBounds`] unless the value is an array
    /// of at least four numbers.
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        let array = value.as_array().ok_or(FormatError::MalformedBounds)?;
        let mut numbers = array.iter().map(Value::as_f64);
        let mut next = || numbers.next().flatten().ok_or(FormatError::MalformedBounds);
        Ok(Self {
            left: next()?,
            bottom: next()?,
            right: next()?,
            top: next()?,
        })
    }
}
