// SPDX-License-Identifier: MPL-2.0
//! Loop range value object.
//!
//! A [`LoopRange`] is the `[start, end)` interval of playback positions that
//! looping keeps the surface inside. It can only be built through
//! [`LoopRange::new`], so every value in circulation satisfies
//! `0 <= start < end`.

use thiserror::Error;

/// Reason a pair of bounds was refused as a loop range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidRangeError {
    /// One of the bounds is NaN or infinite.
    #[error("loop bounds must be finite (start: {start}, end: {end})")]
    NonFinite { start: f64, end: f64 },

    /// The start lies before the beginning of the media.
    #[error("loop start must not be negative (start: {start})")]
    NegativeStart { start: f64 },

    /// The end does not come strictly after the start.
    #[error("loop end must be after start (start: {start}, end: {end})")]
    EmptyRange { start: f64, end: f64 },
}

impl InvalidRangeError {
    /// Returns the i18n message key describing this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::NonFinite { .. } => "loop-error-non-finite",
            Self::NegativeStart { .. } => "loop-error-negative-start",
            Self::EmptyRange { .. } => "loop-error-empty-range",
        }
    }
}

/// Validated loop interval in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopRange {
    start: f64,
    end: f64,
}

impl LoopRange {
    /// Builds a range, rejecting `start < 0`, `end <= start` and non-finite bounds.
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidRangeError`] variant matching the first violated rule.
    pub fn new(start: f64, end: f64) -> Result<Self, InvalidRangeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(InvalidRangeError::NonFinite { start, end });
        }
        if start < 0.0 {
            return Err(InvalidRangeError::NegativeStart { start });
        }
        if end <= start {
            return Err(InvalidRangeError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Start of the loop in seconds.
    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    /// End of the loop in seconds.
    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    /// Length of the loop in seconds.
    #[must_use]
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Returns true if `position` lies in `[start, end)`.
    #[must_use]
    pub fn contains(self, position: f64) -> bool {
        position >= self.start && position < self.end
    }

    /// Returns a copy with a new start, validated like [`LoopRange::new`].
    ///
    /// # Errors
    ///
    /// Fails when the new start is not strictly before the current end.
    pub fn with_start(self, start: f64) -> Result<Self, InvalidRangeError> {
        Self::new(start, self.end)
    }

    /// Returns a copy with a new end, validated like [`LoopRange::new`].
    ///
    /// # Errors
    ///
    /// Fails when the new end is not strictly after the current start.
    pub fn with_end(self, end: f64) -> Result<Self, InvalidRangeError> {
        Self::new(self.start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn new_accepts_valid_bounds() {
        let range = LoopRange::new(10.0, 20.0).expect("valid range");
        assert_abs_diff_eq!(range.start(), 10.0);
        assert_abs_diff_eq!(range.end(), 20.0);
        assert_abs_diff_eq!(range.duration(), 10.0);
    }

    #[test]
    fn new_accepts_zero_start() {
        assert!(LoopRange::new(0.0, 0.5).is_ok());
    }

    #[test]
    fn new_rejects_negative_start() {
        assert_eq!(
            LoopRange::new(-1.0, 5.0),
            Err(InvalidRangeError::NegativeStart { start: -1.0 })
        );
    }

    #[test]
    fn new_rejects_end_equal_to_start() {
        assert!(matches!(
            LoopRange::new(5.0, 5.0),
            Err(InvalidRangeError::EmptyRange { .. })
        ));
    }

    #[test]
    fn new_rejects_end_before_start() {
        assert!(matches!(
            LoopRange::new(8.0, 3.0),
            Err(InvalidRangeError::EmptyRange { .. })
        ));
    }

    #[test]
    fn new_rejects_nan_and_infinity() {
        assert!(matches!(
            LoopRange::new(f64::NAN, 3.0),
            Err(InvalidRangeError::NonFinite { .. })
        ));
        assert!(matches!(
            LoopRange::new(0.0, f64::INFINITY),
            Err(InvalidRangeError::NonFinite { .. })
        ));
    }

    #[test]
    fn contains_is_half_open() {
        let range = LoopRange::new(10.0, 20.0).unwrap();
        assert!(range.contains(10.0));
        assert!(range.contains(19.999));
        assert!(!range.contains(20.0));
        assert!(!range.contains(9.999));
    }

    #[test]
    fn with_start_keeps_end() {
        let range = LoopRange::new(10.0, 20.0).unwrap();
        let moved = range.with_start(15.0).unwrap();
        assert_abs_diff_eq!(moved.start(), 15.0);
        assert_abs_diff_eq!(moved.end(), 20.0);
        assert!(range.with_start(25.0).is_err());
    }

    #[test]
    fn with_end_keeps_start() {
        let range = LoopRange::new(10.0, 20.0).unwrap();
        let moved = range.with_end(30.0).unwrap();
        assert_abs_diff_eq!(moved.start(), 10.0);
        assert_abs_diff_eq!(moved.end(), 30.0);
        assert!(range.with_end(10.0).is_err());
    }

    #[test]
    fn error_messages_and_keys() {
        let err = InvalidRangeError::EmptyRange {
            start: 5.0,
            end: 2.0,
        };
        assert!(err.to_string().contains("after start"));
        assert_eq!(err.i18n_key(), "loop-error-empty-range");
        assert_eq!(
            InvalidRangeError::NegativeStart { start: -1.0 }.i18n_key(),
            "loop-error-negative-start"
        );
    }
}
