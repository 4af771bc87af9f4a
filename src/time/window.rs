use super::Timestamp;

/// The active filtering policy: how far the simulated "current time" has
/// advanced and whether records age out behind it.
///
/// An unset cursor means no position has been interpolated yet; filtering
/// then behaves as if the cursor sat at zero, so only untimestamped records
/// survive while the dataset's minimum timestamp is still being discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    cursor: Option<Timestamp>,
    trailing_bound: Option<Timestamp>,
    cumulative: bool,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TimeWindow {
    #[must_use]
    pub const fn new(cumulative: bool) -> Self {
        Self {
            cursor: None,
            trailing_bound: None,
            cumulative,
        }
    }

    /// Clears cursor and trailing bound, keeping the filtering mode.
    pub const fn reset(&mut self) {
        self.cursor = None;
        self.trailing_bound = None;
    }

    /// Sets the cursor and derives the trailing bound from it.
    ///
    /// The trailing bound is never set independently: in windowed mode it is
    /// always `cursor - time_delta` as of this call, in cumulative mode it
    /// stays unset.
    pub const fn set_cursor(&mut self, cursor: Timestamp, time_delta: Timestamp) {
        self.cursor = Some(cursor);
        self.trailing_bound = if self.cumulative {
            None
        } else {
            Some(cursor.saturating_sub(time_delta))
        };
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<Timestamp> {
        self.cursor
    }

    #[must_use]
    pub const fn trailing_bound(&self) -> Option<Timestamp> {
        self.trailing_bound
    }

    #[must_use]
    pub const fn is_cumulative(&self) -> bool {
        self.cumulative
    }

    /// The cursor value filtering actually runs against.
    #[must_use]
    pub fn effective_cursor(&self) -> Timestamp {
        self.cursor.unwrap_or(0)
    }

    /// Bounds check for a timestamped record: visible when it is not in the
    /// future of the cursor and has not aged out of the trailing window.
    #[must_use]
    pub fn admits(&self, when: Timestamp) -> bool {
        if when > self.effective_cursor() {
            return false;
        }
        if let Some(bound) = self.trailing_bound
            && when < bound
        {
            return false;
        }
        true
    }
}
