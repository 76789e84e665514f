// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Loop**: Range-loop behavior
//! - **Demo page**: Timing of the simulated host page

// ==========================================================================
// Loop Defaults
// ==========================================================================

/// Length of the range created by "set start" when the media duration is
/// unknown (seconds).
pub const DEFAULT_FALLBACK_END_OFFSET_SECS: f64 = 10.0;

/// Minimum accepted fallback end offset (seconds).
pub const MIN_FALLBACK_END_OFFSET_SECS: f64 = 1.0;

/// Maximum accepted fallback end offset (seconds).
pub const MAX_FALLBACK_END_OFFSET_SECS: f64 = 600.0;

// ==========================================================================
// Demo Page Defaults
// ==========================================================================

/// Duration of the simulated video (seconds).
pub const DEFAULT_VIDEO_DURATION_SECS: f64 = 120.0;

/// Delay before the simulated page inserts its `<video>` element (ms).
pub const DEFAULT_VIDEO_APPEARS_AFTER_MS: u64 = 1500;

/// Host event-loop tick (ms).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum host tick (ms).
pub const MIN_TICK_INTERVAL_MS: u64 = 16;

/// Maximum host tick (ms).
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_offset_default_is_within_bounds() {
        assert!(DEFAULT_FALLBACK_END_OFFSET_SECS >= MIN_FALLBACK_END_OFFSET_SECS);
        assert!(DEFAULT_FALLBACK_END_OFFSET_SECS <= MAX_FALLBACK_END_OFFSET_SECS);
    }

    #[test]
    fn tick_default_is_within_bounds() {
        assert!((MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&DEFAULT_TICK_INTERVAL_MS));
    }
}
