use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns at most one repeating timer task.
///
/// `start` always cancels any previous timer first; `stop` is synchronous
/// and idempotent, and a stopped timer delivers no further ticks. The
/// callback returns whether the timer should keep running, which lets the
/// driven state machine cancel its own loop from inside a tick.
#[derive(Debug, Default)]
pub struct Ticker {
    active: Option<JoinHandle<()>>,
}

impl Ticker {
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    pub fn start<F>(&mut self, cadence: Duration, mut tick: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.stop();
        self.active = Some(tokio::spawn(async move {
            let mut timer = tokio::time::interval(cadence);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; consume it so
            // the first callback lands one full cadence after start.
            timer.tick().await;
            loop {
                timer.tick().await;
                if !tick() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
