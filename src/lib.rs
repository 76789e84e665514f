// SPDX-License-Identifier: MPL-2.0
//! `replay_repeat` repeats a user-chosen range of a video.
//!
//! A [`application::VideoDetector`] watches a host document until a video
//! surface appears; a [`application::LoopController`] bound to that surface
//! jumps playback back to the range start whenever it leaves the range. The
//! bundled Iced application drives both against a simulated host page with a
//! floating loop panel.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod logging;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
