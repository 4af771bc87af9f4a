use roxmltree::{Document, Node};
use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::geometry::georss::{child_text, from_item};
use crate::record::Record;
use crate::time::{TimeWindow, Timestamp, TimestampExtractor};

use super::{TimelineFormat, observe_then_filter};

const DEFAULT_FEATURE_TITLE: &str = "Untitled";
const DEFAULT_FEATURE_DESCRIPTION: &str = "No description available";

/// The XML-feed parser variant.
///
/// Detects the feed vocabulary per document: `item` elements are preferred,
/// `entry` elements are the fallback when no items exist; the two are never
/// mixed.
#[derive(Debug)]
pub struct GeoRssTimeline {
    extractor: TimestampExtractor,
    earliest: Option<Timestamp>,
    feature_title: String,
    feature_description: String,
}

impl GeoRssTimeline {
    #[must_use]
    pub fn new(extractor: TimestampExtractor) -> Self {
        Self::with_defaults(extractor, None, None)
    }

    /// Overrides the fallback title and description used when an item
    /// carries neither.
    #[must_use]
    pub fn with_defaults(
        extractor: TimestampExtractor,
        feature_title: Option<String>,
        feature_description: Option<String>,
    ) -> Self {
        Self {
            extractor,
            earliest: None,
            feature_title: feature_title.unwrap_or_else(|| DEFAULT_FEATURE_TITLE.to_owned()),
            feature_description: feature_description
                .unwrap_or_else(|| DEFAULT_FEATURE_DESCRIPTION.to_owned()),
        }
    }

    /// Reads a feed document.
    ///
    /// Returns `None` only when the document itself cannot be parsed, with a
    /// logged diagnostic. Malformed items are skipped individually.
    pub fn read_str(&mut self, xml: &str, window: &TimeWindow) -> Option<Vec<Record>> {
        let doc = match Document::parse(xml) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::error!("{}", FormatError::BadXml { source: err });
                return None;
            }
        };

        let items = collect_items(&doc, "item");
        let items = if items.is_empty() {
            collect_items(&doc, "entry")
        } else {
            items
        };

        let mut records = Vec::new();
        for item in items {
            match self.record_from_item(item, window) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(err) => tracing::warn!("Skipping malformed feed item: {}", err),
            }
        }
        Some(records)
    }

    fn record_from_item(
        &mut self,
        item: Node<'_, '_>,
        window: &TimeWindow,
    ) -> Result<Option<Record>, FormatError> {
        let parsed = from_item(item)?;

        let when = self
            .extractor
            .from_text(child_text(item, self.extractor.date_key()));
        if !observe_then_filter(when, window, &mut self.earliest) {
            return Ok(None);
        }

        let title = child_text(item, "title")
            .map(str::to_owned)
            .unwrap_or_else(|| self.feature_title.clone());
        // RSS descriptions first, then Atom content and summaries.
        let description = child_text(item, "description")
            .or_else(|| child_text(item, "content"))
            .or_else(|| child_text(item, "summary"))
            .map(str::to_owned)
            .unwrap_or_else(|| self.feature_description.clone());
        let link = child_text(item, "link").map(str::to_owned).or_else(|| {
            // Atom links carry the URL in an href attribute instead.
            item.children()
                .find(|node| node.is_element() && node.tag_name().name() == "link")
                .and_then(|node| node.attribute("href"))
                .map(str::to_owned)
        });
        let id = child_text(item, "id").map(str::to_owned);

        let mut properties = Map::new();
        properties.insert("title".to_owned(), Value::String(title));
        properties.insert("description".to_owned(), Value::String(description));
        if let Some(link) = link {
            properties.insert("link".to_owned(), Value::String(link));
        }

        Ok(Some(Record {
            properties,
            geometry: parsed,
            bounds: None,
            id,
            when,
        }))
    }
}

impl TimelineFormat for GeoRssTimeline {
    fn read(&mut self, payload: &str, window: &TimeWindow) -> Option<Vec<Record>> {
        self.read_str(payload, window)
    }

    fn earliest(&self) -> Option<Timestamp> {
        self.earliest
    }

    fn reset(&mut self) {
        self.earliest = None;
    }
}

fn collect_items<'doc, 'input>(
    doc: &'doc Document<'input>,
    local_name: &str,
) -> Vec<Node<'doc, 'input>> {
    doc.root()
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == local_name)
        .collect()
}
