use std::time::Duration;

use tokio::sync::watch;

use crate::config::types::{FormatKind, TimelineOptions};
use crate::formats::{GeoJsonTimeline, GeoRssTimeline, TimelineFormat};
use crate::record::Record;
use crate::time::{TimeWindow, Timestamp, TimestampExtractor};

/// Upper end of the slider range.
pub const SLIDER_MAX: u8 = 100;

/// Real-time cadence of the animation timer.
pub(crate) const TICK_CADENCE: Duration = Duration::from_secs(1);

/// Starting playback this close to the end rewinds to position 0 first.
const REPLAY_MARGIN: u8 = 3;

/// Where the rendering collaborator receives each freshly filtered set.
///
/// The previous set is discarded wholesale; records are never mutated
/// incrementally across passes.
pub trait RenderSink: Send {
    fn replace_dataset(&mut self, records: Vec<Record>);
}

/// A [`RenderSink`] pushing each set through a watch channel, for hosts that
/// consume the visible set asynchronously.
#[derive(Debug)]
pub struct ChannelSink {
    tx: watch::Sender<Vec<Record>>,
}

impl ChannelSink {
    #[must_use]
    pub fn new() -> (Self, watch::Receiver<Vec<Record>>) {
        let (tx, rx) = watch::channel(Vec::new());
        (Self { tx }, rx)
    }
}

impl RenderSink for ChannelSink {
    fn replace_dataset(&mut self, records: Vec<Record>) {
        // A closed channel just means no collaborator is watching.
        drop(self.tx.send(records));
    }
}

/// Controller lifecycle, derived from the underlying state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Uninitialized,
    Ready,
    Paused,
    Playing,
}

/// What a timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// The cursor has caught up to the dataset's present; playback stopped.
    Finished,
}

/// Per-dataset derived values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetMeta {
    /// Minimum timestamp discovered across all timestamped candidates;
    /// anchors the position-to-time mapping. Fixed for the dataset's
    /// lifetime once discovered.
    pub earliest: Option<Timestamp>,
    /// Wall-clock time captured once at dataset load; the upper bound of the
    /// playable range.
    pub dataset_now: Timestamp,
}

/// The playback state machine.
///
/// Owns the [`TimeWindow`] and playback state exclusively; maps slider
/// position to simulated time and re-filters the raw dataset on every cursor
/// change. Purely synchronous — the animation timer lives in
/// [`Player`](super::Player), which calls [`tick`](Timeline::tick).
pub struct Timeline<S: RenderSink> {
    options: TimelineOptions,
    format: Box<dyn TimelineFormat>,
    sink: S,
    window: TimeWindow,
    meta: DatasetMeta,
    dataset: Option<String>,
    position: u8,
    speed_index: usize,
    playing: bool,
}

impl<S: RenderSink> Timeline<S> {
    #[must_use]
    pub fn new(options: TimelineOptions, sink: S) -> Self {
        let extractor =
            TimestampExtractor::new(options.date_key.clone(), options.date_transform.clone());
        let format: Box<dyn TimelineFormat> = match options.format {
            FormatKind::GeoJson => Box::new(GeoJsonTimeline::new(extractor)),
            FormatKind::GeoRss => Box::new(GeoRssTimeline::with_defaults(
                extractor,
                options.feature_title.clone(),
                options.feature_description.clone(),
            )),
        };
        let speed_index = options.speeds.len() / 2;
        let window = TimeWindow::new(options.cumulative);
        Self {
            options,
            format,
            sink,
            window,
            meta: DatasetMeta::default(),
            dataset: None,
            position: 0,
            speed_index,
            playing: false,
        }
    }

    /// Loads a new raw dataset, capturing the wall clock as the dataset's
    /// present moment.
    pub fn load_dataset(&mut self, raw: String) {
        let now = chrono::Utc::now().timestamp();
        self.load_dataset_at(raw, now);
    }

    /// Loads a new raw dataset against an explicit present moment.
    ///
    /// Cancels playback, discards cursor and discovered minimum, and runs
    /// the initial filter pass (unset cursor, so only untimestamped records
    /// are emitted while the minimum is discovered).
    pub fn load_dataset_at(&mut self, raw: String, dataset_now: Timestamp) {
        self.playing = false;
        self.window.reset();
        self.format.reset();
        self.meta = DatasetMeta {
            earliest: None,
            dataset_now,
        };
        self.dataset = Some(raw);
        self.position = 0;
        self.refilter();
    }

    /// The slider "change" transition: maps the position to a cursor and
    /// re-filters. Does not itself alter the play/pause state.
    ///
    /// A no-op while no minimum timestamp is known — there is nothing to
    /// interpolate against.
    pub fn set_position(&mut self, position: u8) {
        let Some(cursor) = self.cursor_for_position(position) else {
            return;
        };
        self.position = position.min(SLIDER_MAX);
        self.window.set_cursor(cursor, self.options.time_delta);
        self.refilter();
    }

    /// The slider "slide" transition (dragging): stops playback and moves
    /// the cursor without re-filtering; the re-filter happens on the
    /// eventual "change".
    pub fn slide_to(&mut self, position: u8) {
        self.playing = false;
        if let Some(cursor) = self.cursor_for_position(position) {
            self.position = position.min(SLIDER_MAX);
            self.window.set_cursor(cursor, self.options.time_delta);
        }
    }

    /// One animation step. Advances the slider by the speed-dependent step
    /// while the cursor trails the dataset's present; once caught up, stops.
    ///
    /// Also finishes immediately when no minimum timestamp is known: with
    /// nothing to interpolate against the cursor can never advance, so the
    /// timer must go inert instead of spinning.
    pub fn tick(&mut self) -> TickOutcome {
        if self.slider_enabled() && self.window.effective_cursor() < self.meta.dataset_now {
            let next = self.position.saturating_add(self.step()).min(SLIDER_MAX);
            self.set_position(next);
            TickOutcome::Advanced
        } else {
            self.playing = false;
            TickOutcome::Finished
        }
    }

    /// Marks playback started. Returns `false` when no dataset is loaded or
    /// the dataset yielded no timestamped records (the same state in which
    /// the slider is disabled).
    pub(crate) fn start_playing(&mut self) -> bool {
        if !self.slider_enabled() {
            return false;
        }
        if SLIDER_MAX.saturating_sub(self.position) <= REPLAY_MARGIN {
            self.set_position(0);
        }
        self.playing = true;
        true
    }

    pub(crate) const fn stop_playing(&mut self) {
        self.playing = false;
    }

    /// Bumps the speed one notch. Returns whether anything changed, so an
    /// active timer can be restarted.
    pub fn faster(&mut self) -> bool {
        let top = self.options.speeds.len().saturating_sub(1);
        if self.speed_index < top {
            self.speed_index = self.speed_index.saturating_add(1);
            return true;
        }
        false
    }

    pub fn slower(&mut self) -> bool {
        if self.speed_index > 0 {
            self.speed_index = self.speed_index.saturating_sub(1);
            return true;
        }
        false
    }

    /// Slider units advanced per tick at the current speed.
    #[must_use]
    pub fn step(&self) -> u8 {
        let step = self.speed_index.saturating_mul(2).saturating_add(1);
        u8::try_from(step).unwrap_or(u8::MAX)
    }

    #[must_use]
    pub fn speed_name(&self) -> Option<&str> {
        self.options.speeds.get(self.speed_index).map(String::as_str)
    }

    #[must_use]
    pub fn phase(&self) -> PlaybackPhase {
        if self.dataset.is_none() {
            PlaybackPhase::Uninitialized
        } else if self.playing {
            PlaybackPhase::Playing
        } else if self.window.cursor().is_none() {
            PlaybackPhase::Ready
        } else {
            PlaybackPhase::Paused
        }
    }

    /// Whether position interpolation is possible: a dataset is loaded and
    /// its minimum timestamp is known.
    #[must_use]
    pub fn slider_enabled(&self) -> bool {
        self.dataset.is_some() && self.meta.earliest.is_some()
    }

    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }

    #[must_use]
    pub const fn window(&self) -> &TimeWindow {
        &self.window
    }

    #[must_use]
    pub const fn meta(&self) -> DatasetMeta {
        self.meta
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }

    /// Re-runs the filter pass over the raw dataset under the current window
    /// and hands the surviving set to the rendering collaborator. A
    /// malformed payload degrades to an empty set.
    fn refilter(&mut self) {
        let Some(raw) = self.dataset.as_deref() else {
            return;
        };
        let records = self.format.read(raw, &self.window).unwrap_or_default();
        self.meta.earliest = self.format.earliest();
        self.sink.replace_dataset(records);
    }

    /// Linear position-to-time mapping:
    /// `cursor = ceil(earliest + (dataset_now − earliest) · p/100)`.
    ///
    /// `None` while `earliest` is unknown. A degenerate single-instant range
    /// pins the cursor to `earliest`.
    fn cursor_for_position(&self, position: u8) -> Option<Timestamp> {
        let first = self.meta.earliest?;
        let now = self.meta.dataset_now;
        if now <= first {
            return Some(first);
        }
        let span = u128::from(now.saturating_sub(first).unsigned_abs());
        let scaled = span.saturating_mul(u128::from(position.min(SLIDER_MAX)));
        // Ceiling division keeps position 100 landing exactly on dataset_now.
        let offset = scaled.saturating_add(99).checked_div(100)?;
        let offset = Timestamp::try_from(offset).unwrap_or(Timestamp::MAX);
        Some(first.saturating_add(offset))
    }
}
