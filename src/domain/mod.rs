// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core looping rules with no presentation dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `thiserror` for error derivation it only uses `std`.
//!
//! # Modules
//!
//! - [`playback`]: Loop range types ([`LoopRange`](playback::LoopRange),
//!   [`LoopState`](playback::LoopState), [`InvalidRangeError`](playback::InvalidRangeError))
//!   and time-code parsing

pub mod playback;
