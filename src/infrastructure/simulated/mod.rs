// SPDX-License-Identifier: MPL-2.0
//! Simulated host environment.
//!
//! Adapters implementing the surface and document ports on top of plain
//! in-memory state, driven by an explicit tick instead of a browser event
//! loop. The desktop host and the integration tests both run on them.

pub mod document;
pub mod page;
pub mod surface;

pub use document::{ElementId, SimulatedDocument, VIDEO_TAG};
pub use page::{PageScript, SimulatedPage};
pub use surface::SimulatedSurface;
