// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! exposes a `Message`, a `State::update` that returns an `Event` for the
//! parent, and a `view` taking a `ViewContext`.
//!
//! - [`player`] - Simulated host player (frame, play/pause, scrubber)
//! - [`loop_panel`] - Floating loop panel driving the loop controller
//! - [`state`] - Reusable state (drag)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod loop_panel;
pub mod player;
pub mod state;
pub mod styles;
