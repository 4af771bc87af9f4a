use thiserror::Error;

/// Failures raised while decoding a payload or a single record.
///
/// Per-record variants never escape the parser boundary: in a collection the
/// offending member is skipped with a diagnostic and siblings are still
/// processed. Payload-level variants surface as an absent result set.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Bad JSON: {source}")]
    BadJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Bad GeoJSON - no type")]
    MissingType,
    #[error("GeoJSON type '{found}' does not match requested type '{requested}'")]
    TypeMismatch {
        requested: &'static str,
        found: String,
    },
    #[error("Feature has no geometry member")]
    MissingGeometry,
    #[error("Unknown geometry type '{0}'")]
    UnknownGeometryType(String),
    #[error("Geometry '{kind}' has no {member} member")]
    MissingCoordinates {
        kind: &'static str,
        member: &'static str,
    },
    #[error("Malformed bbox: expected an array of four numbers")]
    MalformedBounds,
    #[error("Malformed coordinate text '{0}'")]
    MalformedCoordinates(String),
    #[error("Bad XML: {source}")]
    BadXml {
        #[source]
        source: roxmltree::Error,
    },
}
