//! Time values: the canonical timestamp, the filtering window, and the
//! per-format timestamp extraction.
pub mod extract;
pub mod window;

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

pub use extract::{DateTransform, RawTimestamp, TimestampExtractor};
pub use window::TimeWindow;
