// SPDX-License-Identifier: MPL-2.0
//! Waits for a video surface to appear in the host document.
//!
//! Discovery is a point query re-run on every document mutation until it
//! succeeds once. There is no timeout and no retry cap: the video may load
//! at any time after the document is ready.

use crate::application::port::{MutationNotifier, ObserverId, SurfaceLocator};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

/// Watches a document until one video surface is available.
///
/// The `on_found` callback passed to [`start`](Self::start) fires at most once
/// per detector. Dropping the detector stops any pending watch.
pub struct VideoDetector<L, N>
where
    L: SurfaceLocator,
    N: MutationNotifier,
{
    locator: Rc<L>,
    notifier: Rc<N>,
    observer: Rc<Cell<Option<ObserverId>>>,
    found: Rc<Cell<bool>>,
}

impl<L, N> fmt::Debug for VideoDetector<L, N>
where
    L: SurfaceLocator,
    N: MutationNotifier,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoDetector")
            .field("watching", &self.is_watching())
            .field("found", &self.has_found())
            .finish()
    }
}

impl<L, N> VideoDetector<L, N>
where
    L: SurfaceLocator + 'static,
    N: MutationNotifier + 'static,
{
    pub fn new(locator: Rc<L>, notifier: Rc<N>) -> Self {
        Self {
            locator,
            notifier,
            observer: Rc::new(Cell::new(None)),
            found: Rc::new(Cell::new(false)),
        }
    }

    /// Starts looking for a surface.
    ///
    /// When a surface is already present, `on_found` runs before this call
    /// returns and no observer is registered. Otherwise the document is
    /// observed and the first mutation after which a surface exists invokes
    /// `on_found` and ends the watch.
    ///
    /// Calling `start` again while watching, or after a surface was found,
    /// does nothing.
    pub fn start<F>(&mut self, on_found: F)
    where
        F: FnOnce(L::Surface) + 'static,
    {
        if self.has_found() {
            debug!("video surface already delivered, start ignored");
            return;
        }
        if self.is_watching() {
            debug!("video detector already watching, start ignored");
            return;
        }

        if let Some(surface) = self.locator.find_surface() {
            self.found.set(true);
            info!("video surface present at start");
            on_found(surface);
            return;
        }

        let mut on_found = Some(on_found);
        let locator = Rc::clone(&self.locator);
        let notifier = Rc::downgrade(&self.notifier);
        let observer = Rc::clone(&self.observer);
        let found = Rc::clone(&self.found);

        let id = self.notifier.observe(Box::new(move || {
            if found.get() {
                return;
            }
            let Some(surface) = locator.find_surface() else {
                return;
            };

            found.set(true);
            if let (Some(id), Some(notifier)) = (observer.take(), notifier.upgrade()) {
                notifier.disconnect(id);
            }
            info!("video surface appeared after document mutation");
            if let Some(callback) = on_found.take() {
                callback(surface);
            }
        }));

        self.observer.set(Some(id));
        debug!(observer = id.raw(), "waiting for a video surface");
    }

    /// Cancels a pending watch. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(id) = self.observer.take() {
            self.notifier.disconnect(id);
            debug!(observer = id.raw(), "video detector stopped");
        }
    }
}

impl<L, N> VideoDetector<L, N>
where
    L: SurfaceLocator,
    N: MutationNotifier,
{
    /// Returns true while a mutation observer is registered.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.observer.get().is_some()
    }

    /// Returns true once `on_found` has been invoked.
    #[must_use]
    pub fn has_found(&self) -> bool {
        self.found.get()
    }
}

impl<L, N> Drop for VideoDetector<L, N>
where
    L: SurfaceLocator,
    N: MutationNotifier,
{
    fn drop(&mut self) {
        if let Some(id) = self.observer.take() {
            self.notifier.disconnect(id);
        }
    }
}
