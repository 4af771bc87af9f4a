//! The two time-aware record parsers.
//!
//! Both variants implement the same small capability — read a payload under
//! the active [`TimeWindow`], emit the surviving records, track the earliest
//! timestamp seen — and share one visibility predicate so their filtering
//! semantics cannot drift apart.
pub mod geojson;
pub mod georss;


pub use geojson::{GeoJsonKind, GeoJsonTimeline};
pub use georss::GeoRssTimeline;

use crate::record::Record;
use crate::time::{TimeWindow, Timestamp};

/// Capability implemented by each format variant.
///
/// `read` returns `None` only for a malformed top-level payload; filtered-out
/// or malformed individual records never abort the batch. The discovered
/// minimum timestamp accumulates on the instance across calls until `reset`.
pub trait TimelineFormat: Send {
    fn read(&mut self, payload: &str, window: &TimeWindow) -> Option<Vec<Record>>;
    fn earliest(&self) -> Option<Timestamp>;
    fn reset(&mut self);
}

/// The shared visibility predicate.
///
/// An untimestamped record is always visible and never contributes to the
/// minimum. A timestamped one is observed for the minimum BEFORE the cursor
/// bound is tested, so `earliest` reflects the true minimum over the whole
/// candidate set regardless of the cursor in effect for this pass.
pub(crate) fn observe_then_filter(
    when: Option<Timestamp>,
    window: &TimeWindow,
    earliest: &mut Option<Timestamp>,
) -> bool {
    let Some(when) = when else {
        return true;
    };
    if earliest.is_none_or(|first| when < first) {
        *earliest = Some(when);
    }
    window.admits(when)
}
