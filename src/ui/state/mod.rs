// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! State logic kept apart from widgets so it can be tested without a renderer.

pub mod drag;

pub use drag::DragState;
