use serde_json::Value;

use crate::error::FormatError;
use crate::geometry::{self, Bounds};
use crate::record::Record;
use crate::time::{TimeWindow, Timestamp, TimestampExtractor};

use super::{TimelineFormat, observe_then_filter};

/// Declared shape of a JSON-feature payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeoJsonKind {
    Geometry,
    Feature,
    #[default]
    FeatureCollection,
}

impl GeoJsonKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GeoJsonKind::Geometry => "Geometry",
            GeoJsonKind::Feature => "Feature",
            GeoJsonKind::FeatureCollection => "FeatureCollection",
        }
    }
}

/// The JSON-feature parser variant.
#[derive(Debug)]
pub struct GeoJsonTimeline {
    extractor: TimestampExtractor,
    earliest: Option<Timestamp>,
}

impl GeoJsonTimeline {
    #[must_use]
    pub const fn new(extractor: TimestampExtractor) -> Self {
        Self {
            extractor,
            earliest: None,
        }
    }

    /// Decodes a JSON string, then reads it as `kind`.
    ///
    /// Returns `None` for a malformed top-level payload, with a logged
    /// diagnostic; faults never escape the parser boundary.
    pub fn read_str(
        &mut self,
        json: &str,
        kind: GeoJsonKind,
        window: &TimeWindow,
    ) -> Option<Vec<Record>> {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => self.read_value(&value, kind, window),
            Err(err) => {
                tracing::error!("{}", FormatError::BadJson { source: err });
                None
            }
        }
    }

    /// Reads an already-decoded payload as `kind`.
    ///
    /// For `FeatureCollection` requests the input's own top-level type may
    /// independently be a feature, a collection, or a bare geometry.
    pub fn read_value(
        &mut self,
        value: &Value,
        kind: GeoJsonKind,
        window: &TimeWindow,
    ) -> Option<Vec<Record>> {
        let Some(type_name) = value.get("type").and_then(Value::as_str) else {
            tracing::error!("{}", FormatError::MissingType);
            return None;
        };

        match kind {
            GeoJsonKind::Geometry => self.read_geometry(value, type_name),
            GeoJsonKind::Feature => self.read_feature(value, type_name, window),
            GeoJsonKind::FeatureCollection => self.read_collection(value, type_name, window),
        }
    }

    fn read_geometry(&self, value: &Value, type_name: &str) -> Option<Vec<Record>> {
        if geometry::GeometryKind::from_type_name(type_name).is_none() {
            tracing::error!(
                "{}",
                FormatError::TypeMismatch {
                    requested: GeoJsonKind::Geometry.as_str(),
                    found: type_name.to_owned(),
                }
            );
            return None;
        }
        match geometry::parse_geometry(value) {
            Ok(parsed) => Some(vec![Record::from_geometry(parsed)]),
            Err(err) => {
                tracing::error!("{}", err);
                None
            }
        }
    }

    fn read_feature(
        &mut self,
        value: &Value,
        type_name: &str,
        window: &TimeWindow,
    ) -> Option<Vec<Record>> {
        if type_name != "Feature" {
            tracing::error!(
                "{}",
                FormatError::TypeMismatch {
                    requested: GeoJsonKind::Feature.as_str(),
                    found: type_name.to_owned(),
                }
            );
            return None;
        }
        match self.parse_feature(value, window) {
            Ok(record) => Some(record.into_iter().collect()),
            Err(err) => {
                tracing::error!("{}", err);
                None
            }
        }
    }

    fn read_collection(
        &mut self,
        value: &Value,
        type_name: &str,
        window: &TimeWindow,
    ) -> Option<Vec<Record>> {
        match type_name {
            "Feature" => match self.parse_feature(value, window) {
                Ok(record) => Some(record.into_iter().collect()),
                Err(err) => {
                    tracing::error!("{}", err);
                    None
                }
            },
            "FeatureCollection" => {
                let Some(features) = value.get("features").and_then(Value::as_array) else {
                    tracing::error!("Bad GeoJSON - collection has no features array");
                    return None;
                };
                let mut records = Vec::new();
                for feature in features {
                    // One bad member is skipped; siblings still go through.
                    match self.parse_feature(feature, window) {
                        Ok(Some(record)) => records.push(record),
                        Ok(None) => {}
                        Err(err) => tracing::warn!("Skipping malformed feature: {}", err),
                    }
                }
                Some(records)
            }
            _ => match geometry::parse_geometry(value) {
                Ok(parsed) => Some(vec![Record::from_geometry(parsed)]),
                Err(err) => {
                    tracing::error!("{}", err);
                    None
                }
            },
        }
    }

    /// `Ok(None)` means the feature was filtered out by the time window;
    /// `Err` means it was malformed.
    fn parse_feature(
        &mut self,
        value: &Value,
        window: &TimeWindow,
    ) -> Result<Option<Record>, FormatError> {
        let properties = value
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let when = self.extractor.from_properties(&properties);
        if !observe_then_filter(when, window, &mut self.earliest) {
            return Ok(None);
        }

        let geometry_value = value.get("geometry").ok_or(FormatError::MissingGeometry)?;
        let bounds = geometry_value
            .get("bbox")
            .or_else(|| value.get("bbox"))
            .map(Bounds::from_value)
            .transpose()?;
        let parsed = geometry::parse_geometry(geometry_value)?;
        let id = value.get("id").and_then(id_text);

        Ok(Some(Record {
            properties,
            geometry: Some(parsed),
            bounds,
            id,
            when,
        }))
    }
}

impl TimelineFormat for GeoJsonTimeline {
    fn read(&mut self, payload: &str, window: &TimeWindow) -> Option<Vec<Record>> {
        self.read_str(payload, GeoJsonKind::default(), window)
    }

    fn earliest(&self) -> Option<Timestamp> {
        self.earliest
    }

    fn reset(&mut self) {
        self.earliest = None;
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}
