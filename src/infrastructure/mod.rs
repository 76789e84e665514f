// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`simulated`]: In-memory document, video surface and scripted host page
//!   (implement [`VideoSurface`], [`SurfaceLocator`] and [`MutationNotifier`])
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Notifications are queued and delivered by explicit `dispatch_pending`
//!   calls, mirroring a single-threaded event loop
//!
//! [`VideoSurface`]: crate::application::port::VideoSurface
//! [`SurfaceLocator`]: crate::application::port::SurfaceLocator
//! [`MutationNotifier`]: crate::application::port::MutationNotifier

pub mod simulated;

// Re-export main types for convenience
pub use simulated::{PageScript, SimulatedDocument, SimulatedPage, SimulatedSurface};
