// SPDX-License-Identifier: MPL-2.0
//! Host document port definitions.
//!
//! The video detector needs two capabilities from the page that hosts the
//! video: a point query ("is there a surface right now?") and a way to be told
//! whenever the element tree changes. They are separate traits so tests can
//! fake each one independently.

/// Callback invoked once per document mutation notification.
pub type MutationCallback = Box<dyn FnMut()>;

/// Handle identifying one mutation observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Wraps a raw identifier chosen by the notifier implementation.
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

/// Port answering whether a video surface currently exists in the document.
pub trait SurfaceLocator {
    /// Handle type handed to the detector's callback.
    type Surface;

    /// Returns the first surface present in the document, if any.
    fn find_surface(&self) -> Option<Self::Surface>;
}

/// Port delivering document mutation notifications.
///
/// Notifications cover element additions anywhere under the document root,
/// nested ones included. Implementations must tolerate [`disconnect`](Self::disconnect)
/// being called from inside a callback, and must not invoke a callback after
/// it was disconnected.
pub trait MutationNotifier {
    /// Registers a mutation callback.
    fn observe(&self, callback: MutationCallback) -> ObserverId;

    /// Cancels an observer. Unknown ids are ignored.
    fn disconnect(&self, id: ObserverId);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_notifier_object_safe(_: &dyn MutationNotifier) {}
    fn _assert_locator_object_safe(_: &dyn SurfaceLocator<Surface = u32>) {}

    #[test]
    fn observer_id_round_trips_raw_value() {
        assert_eq!(ObserverId::new(7).raw(), 7);
        assert_ne!(ObserverId::new(1), ObserverId::new(2));
    }
}
