use std::fmt;

use serde::Deserialize;

use crate::time::{DateTransform, Timestamp};

/// Default trailing-window width: six months in seconds.
pub const DEFAULT_TIME_DELTA: Timestamp = 15_552_000;

/// Property or child-element name holding the timestamp by default.
pub const DEFAULT_DATE_KEY: &str = "when";

/// File-level configuration. Every field is optional; unset fields keep the
/// [`TimelineOptions`] defaults. The camelCase spellings used by existing
/// datasets are accepted as aliases.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(alias = "dateKey")]
    pub date_key: Option<String>,
    #[serde(alias = "nameKey")]
    pub name_key: Option<String>,
    pub cumulative: Option<bool>,
    #[serde(alias = "timeDelta")]
    pub time_delta: Option<Timestamp>,
    pub speeds: Option<Vec<String>>,
    pub format: Option<FormatKind>,
    #[serde(alias = "formatOptions")]
    pub format_options: Option<FormatOptionsConfig>,
    pub verbose: Option<bool>,
}

/// Which parser variant the controller instantiates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    #[default]
    GeoJson,
    GeoRss,
}

/// Construction options for the chosen parser variant.
#[derive(Debug, Default, Deserialize)]
pub struct FormatOptionsConfig {
    #[serde(alias = "featureTitle")]
    pub feature_title: Option<String>,
    #[serde(alias = "featureDescription")]
    pub feature_description: Option<String>,
}

/// Resolved runtime options for the playback controller.
#[derive(Clone)]
pub struct TimelineOptions {
    pub date_key: String,
    pub name_key: Option<String>,
    pub cumulative: bool,
    pub time_delta: Timestamp,
    pub speeds: Vec<String>,
    pub format: FormatKind,
    pub feature_title: Option<String>,
    pub feature_description: Option<String>,
    /// Injected conversion from raw wire values to epoch seconds; not
    /// representable in a config file.
    pub date_transform: Option<DateTransform>,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            date_key: DEFAULT_DATE_KEY.to_owned(),
            name_key: None,
            cumulative: true,
            time_delta: DEFAULT_TIME_DELTA,
            speeds: vec![
                "Really slow".to_owned(),
                "Slow".to_owned(),
                "Normal".to_owned(),
                "Fast".to_owned(),
                "Really fast".to_owned(),
            ],
            format: FormatKind::default(),
            feature_title: None,
            feature_description: None,
            date_transform: None,
        }
    }
}

impl fmt::Debug for TimelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineOptions")
            .field("date_key", &self.date_key)
            .field("name_key", &self.name_key)
            .field("cumulative", &self.cumulative)
            .field("time_delta", &self.time_delta)
            .field("speeds", &self.speeds)
            .field("format", &self.format)
            .field("feature_title", &self.feature_title)
            .field("feature_description", &self.feature_description)
            .field("date_transform", &self.date_transform.is_some())
            .finish()
    }
}
