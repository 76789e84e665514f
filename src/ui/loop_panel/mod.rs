// SPDX-License-Identifier: MPL-2.0
//! Floating loop panel.
//!
//! The panel owns only presentation state (text inputs, minimized flag,
//! position, status feedback). Actions on the loop itself are returned to the
//! parent as [`Event`]s; the parent applies them to the `LoopController` and
//! hands the resulting snapshot back through [`State::sync`].

mod view;

pub use view::{view, ViewContext};

use crate::domain::playback::{format_time_code, parse_time_code, LoopState};
use crate::ui::design_tokens::spacing;
use crate::ui::state::DragState;
use iced::{Point, Vector};

/// Initial distance of the panel from the top-left corner of the window.
pub const INITIAL_OFFSET: Vector = Vector::new(spacing::MD, spacing::MD);

/// Messages emitted by the panel widgets, plus the cursor events the parent
/// forwards while a drag may be in progress.
#[derive(Debug, Clone)]
pub enum Message {
    SetStartPressed,
    SetEndPressed,
    StartInputChanged(String),
    EndInputChanged(String),
    ApplyPressed,
    ToggleLoopPressed,
    ToggleMinimized,
    ClosePressed,
    HeaderPressed,
    CursorMoved(Point),
    DragReleased,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    MarkStart,
    MarkEnd,
    ApplyRange { start: f64, end: f64 },
    ToggleLoop,
    /// The panel was closed; the parent releases the controller.
    Close,
}

/// Feedback shown in the status line instead of the range summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    /// Localized error message key.
    Error(&'static str),
    /// Localized informational message key.
    Info(&'static str),
}

#[derive(Debug, Clone)]
pub struct State {
    start_input: String,
    end_input: String,
    minimized: bool,
    offset: Vector,
    cursor: Point,
    drag: DragState,
    feedback: Feedback,
    loop_state: LoopState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            start_input: String::new(),
            end_input: String::new(),
            minimized: false,
            offset: INITIAL_OFFSET,
            cursor: Point::ORIGIN,
            drag: DragState::default(),
            feedback: Feedback::None,
            loop_state: LoopState::default(),
        }
    }
}

impl State {
    /// Processes a panel message and returns the action for the parent.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::SetStartPressed => Event::MarkStart,
            Message::SetEndPressed => Event::MarkEnd,
            Message::StartInputChanged(value) => {
                self.start_input = value;
                Event::None
            }
            Message::EndInputChanged(value) => {
                self.end_input = value;
                Event::None
            }
            Message::ApplyPressed => self.parse_inputs(),
            Message::ToggleLoopPressed => {
                if self.loop_state.has_range() {
                    Event::ToggleLoop
                } else {
                    Event::None
                }
            }
            Message::ToggleMinimized => {
                self.minimized = !self.minimized;
                Event::None
            }
            Message::ClosePressed => {
                self.drag.stop();
                Event::Close
            }
            Message::HeaderPressed => {
                self.drag.start(self.cursor, self.offset);
                Event::None
            }
            Message::CursorMoved(position) => {
                self.cursor = position;
                if let Some(offset) = self.drag.calculate_offset(position) {
                    self.offset = offset;
                }
                Event::None
            }
            Message::DragReleased => {
                self.drag.stop();
                Event::None
            }
        }
    }

    fn parse_inputs(&mut self) -> Event {
        let parsed = parse_time_code(&self.start_input)
            .and_then(|start| parse_time_code(&self.end_input).map(|end| (start, end)));

        match parsed {
            Ok((start, end)) => Event::ApplyRange { start, end },
            Err(err) => {
                self.feedback = Feedback::Error(err.i18n_key());
                Event::None
            }
        }
    }

    /// Adopts a fresh controller snapshot, rewriting both inputs from it and
    /// clearing any feedback.
    pub fn sync(&mut self, snapshot: LoopState) {
        self.loop_state = snapshot;
        self.feedback = Feedback::None;
        match snapshot.range {
            Some(range) => {
                self.start_input = format_time_code(range.start());
                self.end_input = format_time_code(range.end());
            }
            None => {
                self.start_input.clear();
                self.end_input.clear();
            }
        }
    }

    /// Adopts a snapshot without touching the inputs the user is editing.
    pub fn observe(&mut self, snapshot: LoopState) {
        self.loop_state = snapshot;
    }

    pub fn show_error(&mut self, key: &'static str) {
        self.feedback = Feedback::Error(key);
    }

    pub fn show_info(&mut self, key: &'static str) {
        self.feedback = Feedback::Info(key);
    }

    #[must_use]
    pub fn start_input(&self) -> &str {
        &self.start_input
    }

    #[must_use]
    pub fn end_input(&self) -> &str {
        &self.end_input
    }

    #[must_use]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[must_use]
    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::playback::LoopRange;
    use crate::test_utils::assert_abs_diff_eq;

    fn snapshot(start: f64, end: f64, enabled: bool) -> LoopState {
        LoopState {
            enabled,
            range: Some(LoopRange::new(start, end).unwrap()),
        }
    }

    #[test]
    fn mark_buttons_forward_events() {
        let mut state = State::default();
        assert_eq!(state.update(Message::SetStartPressed), Event::MarkStart);
        assert_eq!(state.update(Message::SetEndPressed), Event::MarkEnd);
    }

    #[test]
    fn apply_parses_both_inputs() {
        let mut state = State::default();
        state.update(Message::StartInputChanged("1:05".into()));
        state.update(Message::EndInputChanged("1:10.5".into()));

        match state.update(Message::ApplyPressed) {
            Event::ApplyRange { start, end } => {
                assert_abs_diff_eq!(start, 65.0);
                assert_abs_diff_eq!(end, 70.5);
            }
            other => panic!("expected ApplyRange, got {other:?}"),
        }
        assert_eq!(state.feedback(), Feedback::None);
    }

    #[test]
    fn apply_with_bad_input_reports_error_and_emits_nothing() {
        let mut state = State::default();
        state.update(Message::StartInputChanged("abc".into()));
        state.update(Message::EndInputChanged("0:10".into()));

        assert_eq!(state.update(Message::ApplyPressed), Event::None);
        assert_eq!(
            state.feedback(),
            Feedback::Error("time-code-error-malformed")
        );
    }

    #[test]
    fn apply_with_empty_end_reports_empty_error() {
        let mut state = State::default();
        state.update(Message::StartInputChanged("0:10".into()));

        assert_eq!(state.update(Message::ApplyPressed), Event::None);
        assert_eq!(state.feedback(), Feedback::Error("time-code-error-empty"));
    }

    #[test]
    fn toggle_is_ignored_without_range() {
        let mut state = State::default();
        assert_eq!(state.update(Message::ToggleLoopPressed), Event::None);

        state.sync(snapshot(1.0, 2.0, false));
        assert_eq!(state.update(Message::ToggleLoopPressed), Event::ToggleLoop);
    }

    #[test]
    fn sync_rewrites_inputs_and_clears_feedback() {
        let mut state = State::default();
        state.show_error("loop-error-empty-range");
        state.sync(snapshot(65.0, 70.5, true));

        assert_eq!(state.start_input(), "01:05.0");
        assert_eq!(state.end_input(), "01:10.5");
        assert_eq!(state.feedback(), Feedback::None);
        assert!(state.loop_state().is_looping());
    }

    #[test]
    fn observe_keeps_user_edits() {
        let mut state = State::default();
        state.update(Message::StartInputChanged("0:3".into()));
        state.observe(snapshot(1.0, 2.0, true));

        assert_eq!(state.start_input(), "0:3");
        assert!(state.loop_state().is_looping());
    }

    #[test]
    fn minimize_and_restore() {
        let mut state = State::default();
        state.update(Message::ToggleMinimized);
        assert!(state.is_minimized());
        state.update(Message::ToggleMinimized);
        assert!(!state.is_minimized());
    }

    #[test]
    fn close_ends_drag_and_notifies_parent() {
        let mut state = State::default();
        state.update(Message::HeaderPressed);
        assert!(state.is_dragging());

        assert_eq!(state.update(Message::ClosePressed), Event::Close);
        assert!(!state.is_dragging());
    }

    #[test]
    fn header_drag_moves_panel_until_release() {
        let mut state = State::default();
        state.update(Message::CursorMoved(Point::new(100.0, 100.0)));
        state.update(Message::HeaderPressed);
        assert!(state.is_dragging());

        state.update(Message::CursorMoved(Point::new(150.0, 120.0)));
        assert_eq!(
            state.offset(),
            INITIAL_OFFSET + Vector::new(50.0, 20.0)
        );

        state.update(Message::DragReleased);
        state.update(Message::CursorMoved(Point::new(400.0, 400.0)));
        assert_eq!(
            state.offset(),
            INITIAL_OFFSET + Vector::new(50.0, 20.0)
        );
    }

    #[test]
    fn cursor_moves_without_drag_do_not_move_panel() {
        let mut state = State::default();
        state.update(Message::CursorMoved(Point::new(300.0, 300.0)));
        assert_eq!(state.offset(), INITIAL_OFFSET);
    }
}
