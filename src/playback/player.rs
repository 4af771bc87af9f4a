use std::sync::{Arc, Mutex, MutexGuard};

use super::ticker::Ticker;
use super::timeline::{RenderSink, TICK_CADENCE, TickOutcome, Timeline};

/// Async shell around [`Timeline`]: owns the single animation ticker and
/// serializes access to the state machine.
///
/// Requires a running tokio runtime for [`play`](Player::play) and
/// [`toggle_play`](Player::toggle_play).
pub struct Player<S: RenderSink + 'static> {
    timeline: Arc<Mutex<Timeline<S>>>,
    ticker: Ticker,
}

impl<S: RenderSink + 'static> Player<S> {
    #[must_use]
    pub fn new(timeline: Timeline<S>) -> Self {
        Self {
            timeline: Arc::new(Mutex::new(timeline)),
            ticker: Ticker::new(),
        }
    }

    /// Loads a new dataset, cancelling any running animation first.
    pub fn load_dataset(&mut self, raw: String) {
        self.ticker.stop();
        lock_or_recover(&self.timeline).load_dataset(raw);
    }

    /// The slider "change" interaction. Leaves a running animation alone —
    /// the timer's own ticks are what drive "change" during playback.
    pub fn set_position(&mut self, position: u8) {
        lock_or_recover(&self.timeline).set_position(position);
    }

    /// The slider "slide" interaction (dragging): always stops playback.
    pub fn slide(&mut self, position: u8) {
        self.ticker.stop();
        lock_or_recover(&self.timeline).slide_to(position);
    }

    pub fn toggle_play(&mut self) {
        if self.ticker.is_running() {
            self.stop();
        } else {
            self.play();
        }
    }

    /// Starts the animation loop, unless it is already running or no
    /// dataset is loaded.
    pub fn play(&mut self) {
        if self.ticker.is_running() {
            return;
        }
        if !lock_or_recover(&self.timeline).start_playing() {
            return;
        }
        self.spawn_ticker();
    }

    /// Stops the animation loop; idempotent.
    pub fn stop(&mut self) {
        self.ticker.stop();
        lock_or_recover(&self.timeline).stop_playing();
    }

    /// Bumps the playback speed up; restarts a running timer so the new
    /// step takes effect immediately.
    pub fn faster(&mut self) {
        let changed = lock_or_recover(&self.timeline).faster();
        if changed && self.ticker.is_running() {
            self.spawn_ticker();
        }
    }

    pub fn slower(&mut self) {
        let changed = lock_or_recover(&self.timeline).slower();
        if changed && self.ticker.is_running() {
            self.spawn_ticker();
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.ticker.is_running()
    }

    /// Shared handle to the underlying state machine, for hosts that need
    /// to inspect position, window, or metadata.
    #[must_use]
    pub fn timeline(&self) -> Arc<Mutex<Timeline<S>>> {
        Arc::clone(&self.timeline)
    }

    fn spawn_ticker(&mut self) {
        let timeline = Arc::clone(&self.timeline);
        // Cancel-before-start is handled inside Ticker::start.
        self.ticker.start(TICK_CADENCE, move || {
            matches!(lock_or_recover(&timeline).tick(), TickOutcome::Advanced)
        });
    }
}

fn lock_or_recover<S: RenderSink>(
    timeline: &Arc<Mutex<Timeline<S>>>,
) -> MutexGuard<'_, Timeline<S>> {
    match timeline.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
