use serde_json::{Map, Value};

use crate::geometry::{Bounds, Geometry};
use crate::time::Timestamp;

/// One geotagged item surviving a parse pass.
///
/// Records are immutable after parsing and rebuilt from scratch on every
/// re-filter; the parser holds no record set across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Free-form named properties from the wire format.
    pub properties: Map<String, Value>,
    /// Opaque geometry owned by the geometry subsystem, when present.
    pub geometry: Option<Geometry>,
    /// Optional bounding box.
    pub bounds: Option<Bounds>,
    /// Optional stable identifier.
    pub id: Option<String>,
    /// Derived canonical timestamp, when one could be extracted.
    pub when: Option<Timestamp>,
}

impl Record {
    /// A record carrying only a geometry, as produced for bare-geometry
    /// payload members.
    #[must_use]
    pub fn from_geometry(geometry: Geometry) -> Self {
        Self {
            properties: Map::new(),
            geometry: Some(geometry),
            bounds: None,
            id: None,
            when: None,
        }
    }

    /// The display title collaborators show for this record, read from the
    /// configured `name_key` property. Not used by filtering.
    #[must_use]
    pub fn display_title(&self, name_key: &str) -> Option<&str> {
        self.properties.get(name_key).and_then(Value::as_str)
    }
}
