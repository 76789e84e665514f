// SPDX-License-Identifier: MPL-2.0
//! Video surface port definition.
//!
//! This module defines the [`VideoSurface`] trait: the playable media element
//! whose position the loop controller reads and corrects.
//!
//! # Design Notes
//!
//! - A surface is a **shared handle** (like a DOM element): all methods take
//!   `&self` and implementations use interior mutability
//! - Single-threaded; no `Send`/`Sync` bound
//! - Position-change notifications are delivered from the host's event loop,
//!   never synchronously from inside [`VideoSurface::set_position`]. A write
//!   queues a notification that is delivered later.

/// Callback invoked once per position-change notification.
pub type PositionListener = Box<dyn FnMut()>;

/// Handle identifying one position-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wraps a raw identifier chosen by the surface implementation.
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Port for a playable media surface.
///
/// # Contract
///
/// - `current_position` and `set_position` are in seconds; a write is
///   visible to the next `current_position` call and to every listener
///   invoked afterwards.
/// - `duration` is `None` until the media's metadata is known.
/// - `unsubscribe` with an unknown or already removed id is a no-op.
pub trait VideoSurface {
    /// Returns the current playback position in seconds.
    fn current_position(&self) -> f64;

    /// Moves the playback position to `seconds` exactly.
    fn set_position(&self, seconds: f64);

    /// Returns the media duration in seconds, if known.
    fn duration(&self) -> Option<f64>;

    /// Registers a listener for position-change notifications.
    fn subscribe_position_changed(&self, listener: PositionListener) -> ListenerId;

    /// Removes a listener registered with [`subscribe_position_changed`](Self::subscribe_position_changed).
    fn unsubscribe(&self, id: ListenerId);
}

/// Normalizes a raw duration reported by a media backend.
///
/// Backends commonly report NaN, zero or infinity before metadata loads;
/// all of those mean "unknown".
#[must_use]
pub fn known_duration(raw: f64) -> Option<f64> {
    if raw.is_finite() && raw > 0.0 {
        Some(raw)
    } else {
        None
    }
}
