// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, so the loop controller and the video
//! detector never see a concrete media element or document tree.
//!
//! # Available Ports
//!
//! - [`surface`]: Playable media surface (position, duration, change notifications)
//! - [`document`]: Surface discovery and document mutation notifications
//!
//! # Design Notes
//!
//! - Single-threaded: callbacks are boxed `FnMut` without `Send`
//! - Handles (`ListenerId`, `ObserverId`) are plain copyable ids
//! - No `async fn` - notifications arrive from the host's event loop
//!
//! # Example
//!
//! ```ignore
//! use replay_repeat::application::port::VideoSurface;
//!
//! fn rewind(surface: &dyn VideoSurface) {
//!     surface.set_position(0.0);
//! }
//! ```

pub mod document;
pub mod surface;

// Re-export main types for convenience
pub use document::{MutationCallback, MutationNotifier, ObserverId, SurfaceLocator};
pub use surface::{known_duration, ListenerId, PositionListener, VideoSurface};
