// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native window and mouse events, and produces the host tick.

use super::Message;
use crate::ui::loop_panel;
use iced::{event, mouse, time, window, Subscription};
use std::time::Duration;

/// Window close requests, plus the cursor events the loop panel needs to
/// follow a header drag.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::LoopPanel(
            loop_panel::Message::CursorMoved(position),
        )),
        event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::LoopPanel(loop_panel::Message::DragReleased))
        }
        _ => None,
    })
}

/// Periodic tick advancing the simulated page and its media.
pub fn create_tick_subscription(interval: Duration) -> Subscription<Message> {
    time::every(interval).map(Message::Tick)
}
