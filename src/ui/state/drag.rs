// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tracks a grab on the loop panel header and turns cursor movement into a
//! new panel offset.

use iced::{Point, Vector};

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Cursor position where the drag started
    pub start_position: Option<Point>,

    /// Panel offset when the drag started
    pub start_offset: Option<Vector>,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Point, offset: Vector) {
        self.is_dragging = true;
        self.start_position = Some(position);
        self.start_offset = Some(offset);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.start_position = None;
        self.start_offset = None;
    }

    /// Offset the panel should have with the cursor at `current_position`.
    /// Never negative on either axis.
    #[must_use]
    pub fn calculate_offset(&self, current_position: Point) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }

        let start_pos = self.start_position?;
        let start_offset = self.start_offset?;

        let delta = current_position - start_pos;
        Some(Vector::new(
            (start_offset.x + delta.x).max(0.0),
            (start_offset.y + delta.y).max(0.0),
        ))
    }
}
