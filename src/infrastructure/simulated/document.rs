// SPDX-License-Identifier: MPL-2.0
//! In-memory element tree with mutation observers.
//!
//! [`SimulatedDocument`] implements both document ports: it answers the
//! "is there a video right now?" query and batches element insertions and
//! removals into mutation notifications delivered by
//! [`SimulatedDocument::dispatch_pending`].

use super::surface::SimulatedSurface;
use crate::application::port::{MutationCallback, MutationNotifier, ObserverId, SurfaceLocator};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Tag name of elements that carry a video surface.
pub const VIDEO_TAG: &str = "video";

/// Identifies an element inserted into a [`SimulatedDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

struct ElementRecord {
    id: ElementId,
    parent: Option<ElementId>,
    tag: String,
    surface: Option<Rc<SimulatedSurface>>,
}

type SharedCallback = Rc<RefCell<MutationCallback>>;

#[derive(Default)]
pub struct SimulatedDocument {
    elements: RefCell<Vec<ElementRecord>>,
    observers: RefCell<BTreeMap<ObserverId, SharedCallback>>,
    next_element: Cell<u64>,
    next_observer: Cell<u64>,
    pending: Cell<bool>,
}

impl fmt::Debug for SimulatedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedDocument")
            .field("elements", &self.elements.borrow().len())
            .field("observers", &self.observers.borrow().len())
            .field("pending", &self.pending.get())
            .finish()
    }
}

impl SimulatedDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a plain element under `parent` (or the root) and queues a mutation.
    pub fn insert_element(&self, parent: Option<ElementId>, tag: &str) -> ElementId {
        self.insert(parent, tag, None)
    }

    /// Inserts a `<video>` element backed by `surface` and queues a mutation.
    pub fn insert_video(
        &self,
        parent: Option<ElementId>,
        surface: Rc<SimulatedSurface>,
    ) -> ElementId {
        self.insert(parent, VIDEO_TAG, Some(surface))
    }

    /// Removes an element and all of its descendants.
    ///
    /// Returns false when the element is unknown.
    pub fn remove_element(&self, id: ElementId) -> bool {
        let mut elements = self.elements.borrow_mut();
        if !elements.iter().any(|record| record.id == id) {
            return false;
        }

        let mut doomed = vec![id];
        let mut index = 0;
        while index < doomed.len() {
            let current = doomed[index];
            doomed.extend(
                elements
                    .iter()
                    .filter(|record| record.parent == Some(current))
                    .map(|record| record.id),
            );
            index += 1;
        }

        elements.retain(|record| !doomed.contains(&record.id));
        self.pending.set(true);
        true
    }

    /// Returns the number of elements in the tree.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Returns true when mutations are waiting to be dispatched.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.get()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Delivers one batched notification to every observer when mutations
    /// are pending. Returns true if a batch was delivered.
    pub fn dispatch_pending(&self) -> bool {
        if !self.pending.replace(false) {
            return false;
        }

        let ids: Vec<ObserverId> = self.observers.borrow().keys().copied().collect();
        for id in ids {
            let callback = self.observers.borrow().get(&id).cloned();
            if let Some(callback) = callback {
                let mut callback = callback.borrow_mut();
                (*callback)();
            }
        }
        true
    }

    fn insert(
        &self,
        parent: Option<ElementId>,
        tag: &str,
        surface: Option<Rc<SimulatedSurface>>,
    ) -> ElementId {
        let id = ElementId(self.next_element.get());
        self.next_element.set(id.0 + 1);
        self.elements.borrow_mut().push(ElementRecord {
            id,
            parent,
            tag: tag.to_string(),
            surface,
        });
        self.pending.set(true);
        id
    }
}

impl SurfaceLocator for SimulatedDocument {
    type Surface = Rc<SimulatedSurface>;

    fn find_surface(&self) -> Option<Rc<SimulatedSurface>> {
        self.elements
            .borrow()
            .iter()
            .filter(|record| record.tag == VIDEO_TAG)
            .find_map(|record| record.surface.clone())
    }
}

impl MutationNotifier for SimulatedDocument {
    fn observe(&self, callback: MutationCallback) -> ObserverId {
        let id = ObserverId::new(self.next_observer.get());
        self.next_observer.set(id.raw() + 1);
        self.observers
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        id
    }

    fn disconnect(&self, id: ObserverId) {
        self.observers.borrow_mut().remove(&id);
    }
}
