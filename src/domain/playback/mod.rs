// SPDX-License-Identifier: MPL-2.0
//! Range-loop playback domain types.
//!
//! This module contains the loop range value object, the loop state
//! snapshot and time-code conversion. None of it depends on a concrete
//! surface or presentation layer.

pub mod range;
pub mod state;
pub mod time_code;

// Re-export commonly used types
pub use range::{InvalidRangeError, LoopRange};
pub use state::LoopState;
pub use time_code::{format_time_code, parse_time_code, TimeCodeError};
