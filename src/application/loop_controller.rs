// SPDX-License-Identifier: MPL-2.0
//! Range-loop state machine bound to one video surface.
//!
//! The controller owns the loop range and the enabled flag. On every
//! position-change notification from its surface it moves playback back to
//! the range start when the position has left `[start, end)`.
//!
//! The correction handler is idempotent: a correction write makes the
//! surface emit another notification, and on that one the position already
//! lies inside the range so nothing is written.

use crate::application::port::{known_duration, ListenerId, VideoSurface};
use crate::config::DEFAULT_FALLBACK_END_OFFSET_SECS;
use crate::domain::playback::{InvalidRangeError, LoopRange, LoopState};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Tunables applied when a controller is bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    /// Length of the range created by `mark_start` when the duration is unknown.
    pub fallback_end_offset_secs: f64,
    /// Initial value of the enabled flag.
    pub enabled_on_start: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            fallback_end_offset_secs: DEFAULT_FALLBACK_END_OFFSET_SECS,
            enabled_on_start: false,
        }
    }
}

/// Outcome of marking a loop bound at the current playback position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    /// Position that was read from the surface.
    pub position: f64,
    /// The stored range, or why the marked bound was refused.
    pub outcome: Result<LoopRange, InvalidRangeError>,
}

impl Mark {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Loop state machine for a single surface.
///
/// Dropping the controller removes its subscription.
pub struct LoopController {
    surface: Rc<dyn VideoSurface>,
    state: Rc<Cell<LoopState>>,
    listener: Option<ListenerId>,
    settings: LoopSettings,
}

impl fmt::Debug for LoopController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopController")
            .field("state", &self.state.get())
            .field("bound", &self.listener.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

impl LoopController {
    /// Creates a controller and subscribes it to `surface`'s position changes.
    pub fn bind(surface: Rc<dyn VideoSurface>, settings: LoopSettings) -> Self {
        let state = Rc::new(Cell::new(LoopState {
            enabled: settings.enabled_on_start,
            range: None,
        }));

        let listener = {
            let state = Rc::clone(&state);
            let surface_ref = Rc::downgrade(&surface);
            surface.subscribe_position_changed(Box::new(move || {
                if let Some(surface) = surface_ref.upgrade() {
                    correct_position(state.get(), surface.as_ref());
                }
            }))
        };

        info!(listener = listener.raw(), "loop controller bound to surface");

        Self {
            surface,
            state,
            listener: Some(listener),
            settings,
        }
    }

    /// Replaces the loop range after validating it.
    ///
    /// On failure the previous range is kept and the rejection is logged.
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidRangeError`] when `start < 0`, `end <= start`
    /// or either bound is not finite.
    pub fn set_range(&mut self, start: f64, end: f64) -> Result<LoopRange, InvalidRangeError> {
        match LoopRange::new(start, end) {
            Ok(range) => {
                self.store_range(range);
                debug!(start, end, "loop range set");
                Ok(range)
            }
            Err(err) => {
                warn!(%err, start, end, "invalid loop range rejected");
                Err(err)
            }
        }
    }

    /// Uses the current playback position as the loop start.
    ///
    /// Without a range, the end becomes the media duration, or
    /// `position + fallback_end_offset_secs` when the duration is unknown or
    /// not after the position. With a range, only the start moves; a start
    /// at or past the current end is refused and the range is kept.
    pub fn mark_start(&mut self) -> Mark {
        let position = self.surface.current_position();
        let next = match self.state.get().range {
            Some(range) => range.with_start(position),
            None => LoopRange::new(position, self.default_end_after(position)),
        };

        match next {
            Ok(range) => {
                self.store_range(range);
                debug!(start = range.start(), end = range.end(), "loop start marked");
            }
            Err(err) => warn!(%err, position, "loop start not applied, range kept"),
        }
        Mark {
            position,
            outcome: next,
        }
    }

    /// Uses the current playback position as the loop end.
    ///
    /// Without a range, the range becomes `[0, position)`. With a range,
    /// only the end moves; an end at or before the current start is refused
    /// and the range is kept.
    pub fn mark_end(&mut self) -> Mark {
        let position = self.surface.current_position();
        let next = match self.state.get().range {
            Some(range) => range.with_end(position),
            None => LoopRange::new(0.0, position),
        };

        match next {
            Ok(range) => {
                self.store_range(range);
                debug!(start = range.start(), end = range.end(), "loop end marked");
            }
            Err(err) => warn!(%err, position, "loop end not applied, range kept"),
        }
        Mark {
            position,
            outcome: next,
        }
    }

    /// Sets the enabled flag. A range is not required.
    pub fn set_enabled(&mut self, enabled: bool) {
        let mut state = self.state.get();
        state.enabled = enabled;
        self.state.set(state);
        debug!(enabled, "loop enabled flag set");
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        let enabled = !self.state.get().enabled;
        self.set_enabled(enabled);
        enabled
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> LoopState {
        self.state.get()
    }

    /// Runs the correction handler once, as a notification would.
    ///
    /// Returns the position written, or `None` when nothing was written.
    pub fn handle_position_changed(&self) -> Option<f64> {
        correct_position(self.state.get(), self.surface.as_ref())
    }

    /// Returns true while the position-change subscription is active.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.listener.is_some()
    }

    /// Removes the position-change subscription. Safe to call repeatedly.
    pub fn unbind(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.surface.unsubscribe(listener);
            info!(listener = listener.raw(), "loop controller unbound");
        }
    }

    fn store_range(&self, range: LoopRange) {
        let mut state = self.state.get();
        state.range = Some(range);
        self.state.set(state);
    }

    fn default_end_after(&self, position: f64) -> f64 {
        match self.surface.duration().and_then(known_duration) {
            Some(duration) if duration > position => duration,
            _ => position + self.settings.fallback_end_offset_secs,
        }
    }
}

impl Drop for LoopController {
    fn drop(&mut self) {
        self.unbind();
    }
}

/// Keeps `surface` inside the active range of `state`.
///
/// Returns the position written, if any.
fn correct_position(state: LoopState, surface: &dyn VideoSurface) -> Option<f64> {
    let range = state.active_range()?;
    let position = surface.current_position();

    if position >= range.end() || position < range.start() {
        surface.set_position(range.start());
        debug!(
            from = position,
            to = range.start(),
            "playback moved back into loop range"
        );
        return Some(range.start());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::PositionListener;
    use crate::test_utils::assert_abs_diff_eq;
    use std::cell::RefCell;

    /// Surface fake that records every position write and lets tests fire
    /// notifications by hand.
    #[derive(Default)]
    struct RecordingSurface {
        position: Cell<f64>,
        duration: Cell<Option<f64>>,
        writes: RefCell<Vec<f64>>,
        listeners: RefCell<Vec<(ListenerId, Rc<RefCell<PositionListener>>)>>,
        next_id: Cell<u64>,
    }

    impl RecordingSurface {
        fn at(position: f64) -> Rc<Self> {
            let surface = Rc::new(Self::default());
            surface.position.set(position);
            surface
        }

        fn notify(&self) {
            let listeners: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            for listener in listeners {
                let mut callback = listener.borrow_mut();
                (*callback)();
            }
        }

        fn write_count(&self) -> usize {
            self.writes.borrow().len()
        }

        fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    impl VideoSurface for RecordingSurface {
        fn current_position(&self) -> f64 {
            self.position.get()
        }

        fn set_position(&self, seconds: f64) {
            self.position.set(seconds);
            self.writes.borrow_mut().push(seconds);
        }

        fn duration(&self) -> Option<f64> {
            self.duration.get()
        }

        fn subscribe_position_changed(&self, listener: PositionListener) -> ListenerId {
            let id = ListenerId::new(self.next_id.get());
            self.next_id.set(id.raw() + 1);
            self.listeners
                .borrow_mut()
                .push((id, Rc::new(RefCell::new(listener))));
            id
        }

        fn unsubscribe(&self, id: ListenerId) {
            self.listeners.borrow_mut().retain(|(other, _)| *other != id);
        }
    }

    fn bound(surface: &Rc<RecordingSurface>) -> LoopController {
        LoopController::bind(surface.clone(), LoopSettings::default())
    }

    fn looping(surface: &Rc<RecordingSurface>, start: f64, end: f64) -> LoopController {
        let mut controller = bound(surface);
        controller.set_range(start, end).expect("valid range");
        controller.set_enabled(true);
        controller
    }

    #[test]
    fn bind_registers_exactly_one_listener() {
        let surface = RecordingSurface::at(0.0);
        let controller = bound(&surface);
        assert_eq!(surface.listener_count(), 1);
        assert!(controller.is_bound());
    }

    #[test]
    fn new_controller_is_disabled_without_range() {
        let surface = RecordingSurface::at(0.0);
        let controller = bound(&surface);
        assert_eq!(controller.snapshot(), LoopState::default());
    }

    #[test]
    fn settings_can_enable_on_start() {
        let surface = RecordingSurface::at(0.0);
        let controller = LoopController::bind(
            surface.clone(),
            LoopSettings {
                enabled_on_start: true,
                ..LoopSettings::default()
            },
        );
        assert!(controller.snapshot().enabled);
    }

    #[test]
    fn set_range_round_trips_through_snapshot() {
        let surface = RecordingSurface::at(0.0);
        let mut controller = bound(&surface);

        for (start, end) in [(0.0, 0.1), (10.0, 20.0), (3.25, 3600.5)] {
            let range = controller.set_range(start, end).unwrap();
            assert_eq!(controller.snapshot().range, Some(range));
            assert_eq!(range.start(), start);
            assert_eq!(range.end(), end);
        }
    }

    #[test]
    fn invalid_set_range_keeps_previous_range() {
        let surface = RecordingSurface::at(0.0);
        let mut controller = bound(&surface);
        let before = controller.set_range(10.0, 20.0).unwrap();

        for (start, end) in [(20.0, 10.0), (5.0, 5.0), (-1.0, 4.0), (f64::NAN, 4.0)] {
            assert!(controller.set_range(start, end).is_err());
            assert_eq!(controller.snapshot().range, Some(before));
        }
    }

    #[test]
    fn invalid_set_range_keeps_absent_range_absent() {
        let surface = RecordingSurface::at(0.0);
        let mut controller = bound(&surface);
        assert!(controller.set_range(3.0, 1.0).is_err());
        assert!(controller.snapshot().range.is_none());
    }

    #[test]
    fn position_past_end_moves_to_start() {
        let surface = RecordingSurface::at(25.0);
        let controller = looping(&surface, 10.0, 20.0);

        assert_eq!(controller.handle_position_changed(), Some(10.0));
        assert_eq!(surface.current_position(), 10.0);
    }

    #[test]
    fn position_exactly_at_end_moves_to_start() {
        let surface = RecordingSurface::at(20.0);
        let controller = looping(&surface, 10.0, 20.0);

        controller.handle_position_changed();
        assert_eq!(surface.current_position(), 10.0);
    }

    #[test]
    fn position_before_start_moves_to_start() {
        let surface = RecordingSurface::at(5.0);
        let controller = looping(&surface, 10.0, 20.0);

        controller.handle_position_changed();
        assert_eq!(surface.current_position(), 10.0);
        assert_eq!(*surface.writes.borrow(), vec![10.0]);
    }

    #[test]
    fn position_inside_range_is_left_alone() {
        let surface = RecordingSurface::at(15.0);
        let controller = looping(&surface, 10.0, 20.0);

        assert_eq!(controller.handle_position_changed(), None);
        assert_eq!(surface.write_count(), 0);
    }

    #[test]
    fn second_invocation_after_correction_writes_nothing() {
        let surface = RecordingSurface::at(25.0);
        let controller = looping(&surface, 10.0, 20.0);

        controller.handle_position_changed();
        controller.handle_position_changed();
        controller.handle_position_changed();
        assert_eq!(surface.write_count(), 1);
    }

    #[test]
    fn notifications_reach_the_handler() {
        let surface = RecordingSurface::at(25.0);
        let _controller = looping(&surface, 10.0, 20.0);

        surface.notify();
        surface.notify();
        assert_eq!(surface.current_position(), 10.0);
        assert_eq!(surface.write_count(), 1);
    }

    #[test]
    fn disabled_controller_never_writes() {
        let surface = RecordingSurface::at(25.0);
        let mut controller = bound(&surface);
        controller.set_range(10.0, 20.0).unwrap();

        for position in [0.0, 5.0, 15.0, 20.0, 100.0] {
            surface.position.set(position);
            surface.notify();
            controller.handle_position_changed();
        }
        assert_eq!(surface.write_count(), 0);
    }

    #[test]
    fn enabled_without_range_never_writes() {
        let surface = RecordingSurface::at(25.0);
        let mut controller = bound(&surface);
        controller.set_enabled(true);

        surface.notify();
        assert_eq!(controller.handle_position_changed(), None);
        assert_eq!(surface.write_count(), 0);
    }

    #[test]
    fn mark_start_without_range_uses_duration() {
        let surface = RecordingSurface::at(30.0);
        surface.duration.set(Some(120.0));
        let mut controller = bound(&surface);

        assert_eq!(controller.mark_start().position, 30.0);
        let range = controller.snapshot().range.unwrap();
        assert_eq!(range.start(), 30.0);
        assert_eq!(range.end(), 120.0);
    }

    #[test]
    fn mark_start_without_duration_falls_back_to_offset() {
        let surface = RecordingSurface::at(30.0);
        let mut controller = bound(&surface);

        controller.mark_start();
        let range = controller.snapshot().range.unwrap();
        assert_abs_diff_eq!(range.end(), 40.0);
    }

    #[test]
    fn mark_start_at_media_end_falls_back_to_offset() {
        let surface = RecordingSurface::at(120.0);
        surface.duration.set(Some(120.0));
        let mut controller = bound(&surface);

        controller.mark_start();
        let range = controller.snapshot().range.unwrap();
        assert_abs_diff_eq!(range.start(), 120.0);
        assert_abs_diff_eq!(range.end(), 130.0);
    }

    #[test]
    fn mark_start_ignores_nan_duration() {
        let surface = RecordingSurface::at(2.0);
        surface.duration.set(Some(f64::NAN));
        let mut controller = bound(&surface);

        controller.mark_start();
        assert_abs_diff_eq!(controller.snapshot().range.unwrap().end(), 12.0);
    }

    #[test]
    fn mark_start_with_range_moves_only_start() {
        let surface = RecordingSurface::at(12.0);
        let mut controller = bound(&surface);
        controller.set_range(10.0, 20.0).unwrap();

        controller.mark_start();
        let range = controller.snapshot().range.unwrap();
        assert_eq!(range.start(), 12.0);
        assert_eq!(range.end(), 20.0);
    }

    #[test]
    fn mark_start_past_end_keeps_range() {
        let surface = RecordingSurface::at(25.0);
        let mut controller = bound(&surface);
        let before = controller.set_range(10.0, 20.0).unwrap();

        let mark = controller.mark_start();
        assert_eq!(mark.position, 25.0);
        assert!(matches!(
            mark.outcome,
            Err(InvalidRangeError::EmptyRange { .. })
        ));
        assert!(!mark.is_applied());
        assert_eq!(controller.snapshot().range, Some(before));
    }

    #[test]
    fn mark_end_without_range_starts_at_zero() {
        let surface = RecordingSurface::at(45.0);
        let mut controller = bound(&surface);

        assert_eq!(controller.mark_end().position, 45.0);
        let range = controller.snapshot().range.unwrap();
        assert_eq!(range.start(), 0.0);
        assert_eq!(range.end(), 45.0);
    }

    #[test]
    fn mark_end_at_zero_without_range_keeps_range_absent() {
        let surface = RecordingSurface::at(0.0);
        let mut controller = bound(&surface);

        let mark = controller.mark_end();
        assert_eq!(mark.position, 0.0);
        assert!(!mark.is_applied());
        assert!(controller.snapshot().range.is_none());
    }

    #[test]
    fn mark_end_with_range_moves_only_end() {
        let surface = RecordingSurface::at(18.0);
        let mut controller = bound(&surface);
        controller.set_range(10.0, 20.0).unwrap();

        let mark = controller.mark_end();
        let range = controller.snapshot().range.unwrap();
        assert_eq!(mark.outcome, Ok(range));
        assert_eq!(range.start(), 10.0);
        assert_eq!(range.end(), 18.0);
    }

    #[test]
    fn mark_end_before_start_keeps_range() {
        let surface = RecordingSurface::at(5.0);
        let mut controller = bound(&surface);
        let before = controller.set_range(10.0, 20.0).unwrap();

        assert!(!controller.mark_end().is_applied());
        assert_eq!(controller.snapshot().range, Some(before));
    }

    #[test]
    fn toggle_flips_and_returns_new_value() {
        let surface = RecordingSurface::at(0.0);
        let mut controller = bound(&surface);

        assert!(controller.toggle());
        assert!(controller.snapshot().enabled);
        assert!(!controller.toggle());
        assert!(!controller.snapshot().enabled);
    }

    #[test]
    fn snapshot_is_detached_copy() {
        let surface = RecordingSurface::at(0.0);
        let mut controller = bound(&surface);
        controller.set_range(10.0, 20.0).unwrap();

        let mut snapshot = controller.snapshot();
        snapshot.enabled = true;
        snapshot.range = None;

        assert!(!controller.snapshot().enabled);
        assert!(controller.snapshot().range.is_some());
    }

    #[test]
    fn unbind_is_idempotent_and_stops_corrections() {
        let surface = RecordingSurface::at(25.0);
        let mut controller = looping(&surface, 10.0, 20.0);

        controller.unbind();
        controller.unbind();
        assert!(!controller.is_bound());
        assert_eq!(surface.listener_count(), 0);

        surface.notify();
        assert_eq!(surface.write_count(), 0);
    }

    #[test]
    fn drop_unsubscribes() {
        let surface = RecordingSurface::at(0.0);
        {
            let _controller = bound(&surface);
            assert_eq!(surface.listener_count(), 1);
        }
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn controllers_on_separate_surfaces_do_not_share_state() {
        let first_surface = RecordingSurface::at(25.0);
        let second_surface = RecordingSurface::at(25.0);
        let first = looping(&first_surface, 10.0, 20.0);
        let second = bound(&second_surface);

        first_surface.notify();
        second_surface.notify();

        assert!(first.snapshot().is_looping());
        assert_eq!(second.snapshot(), LoopState::default());
        assert_eq!(second_surface.write_count(), 0);
    }
}
