// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`loop_controller`]: Range-loop state machine bound to one surface
//! - [`video_detector`]: Watcher that waits for a surface to appear
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer drives the controller through its mutators
//!
//! # Example
//!
//! ```ignore
//! use replay_repeat::application::loop_controller::{LoopController, LoopSettings};
//! use replay_repeat::application::video_detector::VideoDetector;
//!
//! let mut detector = VideoDetector::new(locator, notifier);
//! detector.start(move |surface| {
//!     let mut controller = LoopController::bind(surface, LoopSettings::default());
//!     controller.set_range(10.0, 20.0).ok();
//!     controller.set_enabled(true);
//! });
//! ```

pub mod loop_controller;
pub mod port;
pub mod video_detector;

pub use loop_controller::{LoopController, LoopSettings, Mark};
pub use video_detector::VideoDetector;
