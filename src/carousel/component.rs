//! Mounted carousel: state, slide fetch and auto-advance timer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::service::SlideService;
use super::state::CarouselState;
use super::timer::AdvanceTimer;
use crate::config::CarouselSettings;
use crate::models::default_slides;

/// How a carousel behaves once mounted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountOptions {
    pub interval: Duration,
    /// Ask the slide service for slides; when false the built-in set is used.
    pub fetch_remote: bool,
}

impl From<&CarouselSettings> for MountOptions {
    fn from(settings: &CarouselSettings) -> Self {
        Self {
            interval: settings.interval,
            fetch_remote: settings.remote_enabled,
        }
    }
}

struct TimerSlot {
    timer: Option<AdvanceTimer>,
    slide_count: usize,
}

struct Shared {
    state: watch::Sender<CarouselState>,
    mounted: AtomicBool,
    timer: Mutex<TimerSlot>,
    interval: Duration,
}

impl Shared {
    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    fn timer_slot(&self) -> MutexGuard<'_, TimerSlot> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A carousel bound to a slide service for as long as it is mounted.
///
/// Mounting starts one slide fetch and the auto-advance timer. Unmounting
/// (or dropping) stops both; updates that arrive afterwards are discarded.
/// Observers follow the state through [`Carousel::subscribe`].
pub struct Carousel {
    shared: Arc<Shared>,
    fetch: Option<JoinHandle<()>>,
}

impl Carousel {
    /// Mount a carousel. Must be called from within a Tokio runtime.
    pub fn mount(service: Arc<dyn SlideService>, options: MountOptions) -> Self {
        let initial = if options.fetch_remote {
            CarouselState::new()
        } else {
            CarouselState::loaded(default_slides())
        };
        let (state, _) = watch::channel(initial);
        let shared = Arc::new(Shared {
            state,
            mounted: AtomicBool::new(true),
            timer: Mutex::new(TimerSlot {
                timer: None,
                slide_count: 0,
            }),
            interval: options.interval,
        });
        sync_timer(&shared);

        let fetch = options
            .fetch_remote
            .then(|| tokio::spawn(load_slides(service, Arc::downgrade(&shared))));

        Self { shared, fetch }
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CarouselState> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> CarouselState {
        self.shared.state.borrow().clone()
    }

    /// Wait for the slide fetch to settle and return the resulting state.
    pub async fn loaded(&self) -> CarouselState {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        state
    }

    pub fn next(&self) {
        self.shared.state.send_modify(CarouselState::advance);
    }

    pub fn previous(&self) {
        self.shared.state.send_modify(CarouselState::previous);
    }

    /// Jump to slide `index`; returns false if it is out of range.
    pub fn select(&self, index: usize) -> bool {
        self.shared.state.send_if_modified(|state| state.select(index))
    }

    /// Resolved URL behind the action button of the active slide.
    pub fn action_target(&self) -> Option<String> {
        self.shared.state.borrow().action_target()
    }

    /// Stop the timer and any pending fetch.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        // Flipped under the state lock so no in-flight update lands afterwards.
        let shared = &self.shared;
        shared.state.send_if_modified(|_| {
            shared.mounted.store(false, Ordering::SeqCst);
            false
        });
        shared.timer_slot().timer = None;
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn load_slides(service: Arc<dyn SlideService>, shared: Weak<Shared>) {
    let outcome = service.fetch_slides().await.map_err(|e| {
        tracing::warn!("Failed to load slides: {}", e);
        e.to_string()
    });

    let Some(shared) = shared.upgrade() else {
        return;
    };
    let applied = shared
        .state
        .send_if_modified(|state| shared.is_mounted() && state.finish_loading(outcome));
    if applied {
        tracing::debug!(
            "Carousel loaded with {} slides",
            shared.state.borrow().slides().len()
        );
        sync_timer(&shared);
    }
}

/// Keep exactly one timer running while there are slides, restarting it when
/// the slide count changes.
fn sync_timer(shared: &Arc<Shared>) {
    let count = shared.state.borrow().slides().len();
    let mut slot = shared.timer_slot();

    if !shared.is_mounted() {
        slot.timer = None;
        return;
    }
    if slot.timer.is_some() && slot.slide_count == count {
        return;
    }

    slot.timer = None;
    slot.slide_count = count;
    if count == 0 {
        return;
    }

    let weak = Arc::downgrade(shared);
    slot.timer = Some(AdvanceTimer::start(shared.interval, move || {
        if let Some(shared) = weak.upgrade() {
            shared.state.send_if_modified(|state| {
                if !shared.is_mounted() {
                    return false;
                }
                state.advance();
                true
            });
        }
    }));
}
