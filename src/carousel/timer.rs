//! Scoped periodic timer.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Calls a tick callback every `period` until dropped.
///
/// The first tick fires one full period after start. Dropping the timer
/// aborts its task, so holding the timer is holding the subscription.
pub struct AdvanceTimer {
    handle: JoinHandle<()>,
}

impl AdvanceTimer {
    /// Start ticking. Must be called from within a Tokio runtime.
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let first = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                on_tick();
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for AdvanceTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
