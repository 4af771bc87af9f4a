use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use serde_json::{Map, Value};

use super::Timestamp;

/// A timestamp value as it appears on the wire, before canonicalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTimestamp {
    Number(f64),
    Text(String),
}

/// Injected conversion from a raw wire value to canonical epoch seconds.
///
/// Must be pure; returning `None` marks the value unparseable, which leaves
/// the record untimestamped (and therefore always visible).
pub type DateTransform = Arc<dyn Fn(&RawTimestamp) -> Option<Timestamp> + Send + Sync>;

/// Pulls a record's timestamp out of its raw property bag or feed child
/// element and converts it to canonical epoch seconds.
pub struct TimestampExtractor {
    date_key: String,
    transform: Option<DateTransform>,
}

impl TimestampExtractor {
    #[must_use]
    pub fn new(date_key: impl Into<String>, transform: Option<DateTransform>) -> Self {
        Self {
            date_key: date_key.into(),
            transform,
        }
    }

    #[must_use]
    pub fn date_key(&self) -> &str {
        &self.date_key
    }

    /// Extracts from a JSON property bag. Absent key, non-scalar value, or a
    /// failed conversion all yield `None`.
    #[must_use]
    pub fn from_properties(&self, properties: &Map<String, Value>) -> Option<Timestamp> {
        let raw = match properties.get(&self.date_key)? {
            Value::Number(number) => RawTimestamp::Number(number.as_f64()?),
            Value::String(text) => RawTimestamp::Text(text.clone()),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
        };
        self.canonical(&raw)
    }

    /// Extracts from feed child-element text.
    #[must_use]
    pub fn from_text(&self, raw: Option<&str>) -> Option<Timestamp> {
        let text = raw?.trim();
        if text.is_empty() {
            return None;
        }
        self.canonical(&RawTimestamp::Text(text.to_owned()))
    }

    fn canonical(&self, raw: &RawTimestamp) -> Option<Timestamp> {
        let seconds = match &self.transform {
            Some(transform) => transform(raw),
            None => default_canonical(raw),
        };
        // Zero is indistinguishable from unset in both wire formats.
        seconds.filter(|&value| value != 0)
    }
}

impl fmt::Debug for TimestampExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimestampExtractor")
            .field("date_key", &self.date_key)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Default canonicalization when no transform is injected: numbers pass
/// through, texts try integer, float, RFC 3339, then RFC 2822.
fn default_canonical(raw: &RawTimestamp) -> Option<Timestamp> {
    match raw {
        RawTimestamp::Number(number) => number.is_finite().then_some(*number as Timestamp),
        RawTimestamp::Text(text) => {
            let text = text.trim();
            if let Ok(seconds) = text.parse::<i64>() {
                return Some(seconds);
            }
            if let Ok(seconds) = text.parse::<f64>() {
                return seconds.is_finite().then_some(seconds as Timestamp);
            }
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.timestamp());
            }
            DateTime::parse_from_rfc2822(text)
                .ok()
                .map(|parsed| parsed.timestamp())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("when".to_owned(), value);
        map
    }

    #[test]
    fn extracts_numeric_seconds() {
        let extractor = TimestampExtractor::new("when", None);
        assert_eq!(extractor.from_properties(&props(json!(1234))), Some(1234));
    }

    #[test]
    fn missing_key_is_absent() {
        let extractor = TimestampExtractor::new("when", None);
        assert_eq!(extractor.from_properties(&Map::new()), None);
    }

    #[test]
    fn non_scalar_values_are_absent() {
        let extractor = TimestampExtractor::new("when", None);
        assert_eq!(extractor.from_properties(&props(json!([1, 2]))), None);
        assert_eq!(extractor.from_properties(&props(json!(null))), None);
    }

    #[test]
    fn zero_is_treated_as_unset() {
        let extractor = TimestampExtractor::new("when", None);
        assert_eq!(extractor.from_properties(&props(json!(0))), None);
        assert_eq!(extractor.from_text(Some("0")), None);
    }

    #[test]
    fn text_falls_back_through_date_formats() {
        let extractor = TimestampExtractor::new("when", None);
        assert_eq!(extractor.from_text(Some("1234")), Some(1234));
        assert_eq!(extractor.from_text(Some("1234.9")), Some(1234));
        assert_eq!(
            extractor.from_text(Some("1970-01-01T00:20:34Z")),
            Some(1234)
        );
        assert_eq!(
            extractor.from_text(Some("Thu, 01 Jan 1970 00:20:34 +0000")),
            Some(1234)
        );
        assert_eq!(extractor.from_text(Some("not a date")), None);
        assert_eq!(extractor.from_text(Some("   ")), None);
        assert_eq!(extractor.from_text(None), None);
    }

    #[test]
    fn injected_transform_wins() {
        let transform: DateTransform = Arc::new(|raw| match raw {
            RawTimestamp::Number(number) => Some((*number as Timestamp).saturating_mul(60)),
            RawTimestamp::Text(_) => None,
        });
        let extractor = TimestampExtractor::new("when", Some(transform));
        assert_eq!(extractor.from_properties(&props(json!(2))), Some(120));
        assert_eq!(extractor.from_properties(&props(json!("2"))), None);
    }
}
