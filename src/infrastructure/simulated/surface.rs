// SPDX-License-Identifier: MPL-2.0
//! Clock-driven video surface.
//!
//! [`SimulatedSurface`] behaves like a media element on a single-threaded
//! event loop: position writes and playback progress queue a
//! position-change notification, and [`SimulatedSurface::dispatch_pending`]
//! delivers queued notifications to listeners. Listeners may write the
//! position, subscribe or unsubscribe while being dispatched.

use crate::application::port::{ListenerId, PositionListener, VideoSurface};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Upper bound on notification rounds per dispatch, so a listener that
/// writes on every notification cannot stall the host's event loop.
pub const MAX_DISPATCH_ROUNDS: usize = 8;

type SharedListener = Rc<RefCell<PositionListener>>;

#[derive(Default)]
pub struct SimulatedSurface {
    position: Cell<f64>,
    duration: Cell<Option<f64>>,
    playing: Cell<bool>,
    pending: Cell<usize>,
    position_writes: Cell<usize>,
    listeners: RefCell<Vec<(ListenerId, SharedListener)>>,
    next_listener: Cell<u64>,
}

impl fmt::Debug for SimulatedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedSurface")
            .field("position", &self.position.get())
            .field("duration", &self.duration.get())
            .field("playing", &self.playing.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl SimulatedSurface {
    /// Creates a paused surface at position zero with an unknown duration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a paused surface whose metadata is already loaded.
    #[must_use]
    pub fn with_duration(duration_secs: f64) -> Self {
        let surface = Self::new();
        surface.set_duration(Some(duration_secs));
        surface
    }

    /// Sets the media duration, as a metadata load would.
    pub fn set_duration(&self, duration_secs: Option<f64>) {
        self.duration
            .set(duration_secs.filter(|d| d.is_finite() && *d > 0.0));
    }

    pub fn play(&self) {
        self.playing.set(true);
    }

    pub fn pause(&self) {
        self.playing.set(false);
    }

    /// Toggles between playing and paused, returning true when now playing.
    pub fn toggle_playback(&self) -> bool {
        let playing = !self.playing.get();
        self.playing.set(playing);
        playing
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// Advances playback by `elapsed` when playing.
    ///
    /// Playback stops at the end of the media: a surface that is already at
    /// its end when advanced pauses instead of moving. Each movement queues
    /// one notification.
    pub fn advance(&self, elapsed: Duration) {
        if !self.playing.get() {
            return;
        }

        let position = self.position.get();
        let next = position + elapsed.as_secs_f64();
        match self.duration.get() {
            Some(duration) if position >= duration => {
                self.playing.set(false);
            }
            Some(duration) => {
                self.position.set(next.min(duration));
                self.queue_notification();
            }
            None => {
                self.position.set(next);
                self.queue_notification();
            }
        }
    }

    /// Delivers queued notifications, including those queued by listeners
    /// during delivery, up to [`MAX_DISPATCH_ROUNDS`] rounds.
    ///
    /// Returns the number of rounds delivered.
    pub fn dispatch_pending(&self) -> usize {
        let mut rounds = 0;
        while self.pending.get() > 0 && rounds < MAX_DISPATCH_ROUNDS {
            self.pending.set(0);
            rounds += 1;

            let listeners: Vec<(ListenerId, SharedListener)> = self
                .listeners
                .borrow()
                .iter()
                .map(|(id, listener)| (*id, Rc::clone(listener)))
                .collect();

            for (id, listener) in listeners {
                if !self.is_subscribed(id) {
                    continue;
                }
                let mut callback = listener.borrow_mut();
                (*callback)();
            }
        }
        rounds
    }

    /// Returns true when notifications are waiting to be dispatched.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.get() > 0
    }

    /// Number of position writes since creation, seeks and corrections alike.
    #[must_use]
    pub fn position_writes(&self) -> usize {
        self.position_writes.get()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|(other, _)| *other == id)
    }

    fn queue_notification(&self) {
        self.pending.set(self.pending.get() + 1);
    }
}

impl VideoSurface for SimulatedSurface {
    fn current_position(&self) -> f64 {
        self.position.get()
    }

    fn set_position(&self, seconds: f64) {
        let mut target = seconds.max(0.0);
        if let Some(duration) = self.duration.get() {
            target = target.min(duration);
        }
        self.position.set(target);
        self.position_writes.set(self.position_writes.get() + 1);
        self.queue_notification();
    }

    fn duration(&self) -> Option<f64> {
        self.duration.get()
    }

    fn subscribe_position_changed(&self, listener: PositionListener) -> ListenerId {
        let id = ListenerId::new(self.next_listener.get());
        self.next_listener.set(id.raw() + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(other, _)| *other != id);
    }
}
