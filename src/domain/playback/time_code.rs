// SPDX-License-Identifier: MPL-2.0
//! Time codes typed into the loop panel.
//!
//! Accepted forms are `ss`, `m:ss` and `h:mm:ss`, each with an optional
//! fractional part on the seconds field (`1:05.5`). Formatting always emits
//! tenths so that a formatted value parses back to the same tenth.

use thiserror::Error;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3600;

/// Reason a time code could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeCodeError {
    #[error("time code is empty")]
    Empty,

    #[error("malformed time code: {0}")]
    Malformed(String),

    /// A minutes or seconds field is 60 or more while a higher field is present.
    #[error("time code field out of range: {0}")]
    FieldOutOfRange(String),
}

impl TimeCodeError {
    /// Returns the i18n message key describing this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::Empty => "time-code-error-empty",
            Self::Malformed(_) => "time-code-error-malformed",
            Self::FieldOutOfRange(_) => "time-code-error-out-of-range",
        }
    }
}

/// Formats seconds as `mm:ss.d`, or `hh:mm:ss.d` from one hour on.
///
/// Negative and non-finite inputs are shown as zero.
#[must_use]
pub fn format_time_code(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let total_tenths = (seconds * 10.0).round() as u64;
    let tenths = total_tenths % 10;
    let total_secs = total_tenths / 10;
    let hours = total_secs / SECS_PER_HOUR;
    let minutes = (total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = total_secs % SECS_PER_MINUTE;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}.{tenths}")
    } else {
        format!("{minutes:02}:{secs:02}.{tenths}")
    }
}

/// Parses a time code into seconds.
///
/// # Errors
///
/// Returns [`TimeCodeError`] for empty input, anything other than digits,
/// `:` and a single `.` in the seconds field, more than three fields, or
/// minutes/seconds of 60 or more below a higher field.
pub fn parse_time_code(input: &str) -> Result<f64, TimeCodeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeCodeError::Empty);
    }

    let fields: Vec<&str> = trimmed.split(':').collect();
    if fields.len() > 3 {
        return Err(TimeCodeError::Malformed(trimmed.to_string()));
    }

    let (higher, last) = fields.split_at(fields.len() - 1);
    let seconds = parse_seconds_field(last[0])
        .ok_or_else(|| TimeCodeError::Malformed(trimmed.to_string()))?;

    let mut whole = Vec::with_capacity(higher.len());
    for field in higher {
        let value = parse_integer_field(field)
            .ok_or_else(|| TimeCodeError::Malformed(trimmed.to_string()))?;
        whole.push(value);
    }

    if !whole.is_empty() && seconds >= SECS_PER_MINUTE as f64 {
        return Err(TimeCodeError::FieldOutOfRange(trimmed.to_string()));
    }

    let out_of_range = || TimeCodeError::FieldOutOfRange(trimmed.to_string());
    let whole_secs = match whole.as_slice() {
        [] => 0,
        [minutes] => minutes.checked_mul(SECS_PER_MINUTE).ok_or_else(out_of_range)?,
        [hours, minutes] => {
            if *minutes >= SECS_PER_MINUTE {
                return Err(out_of_range());
            }
            hours
                .checked_mul(SECS_PER_HOUR)
                .and_then(|secs| secs.checked_add(minutes * SECS_PER_MINUTE))
                .ok_or_else(out_of_range)?
        }
        _ => return Err(TimeCodeError::Malformed(trimmed.to_string())),
    };

    let total = whole_secs as f64 + seconds;
    if !total.is_finite() {
        return Err(out_of_range());
    }
    Ok(total)
}

fn parse_integer_field(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_seconds_field(field: &str) -> Option<f64> {
    let mut parts = field.splitn(2, '.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next();

    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() || !digits_only(integer) {
        return None;
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !digits_only(fraction) {
            return None;
        }
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn format_handles_zero() {
        assert_eq!(format_time_code(0.0), "00:00.0");
    }

    #[test]
    fn format_handles_minutes_and_tenths() {
        assert_eq!(format_time_code(125.2), "02:05.2");
        assert_eq!(format_time_code(45.0), "00:45.0");
    }

    #[test]
    fn format_handles_hours() {
        assert_eq!(format_time_code(3665.5), "01:01:05.5");
    }

    #[test]
    fn format_rounds_to_tenths_across_minute_boundary() {
        assert_eq!(format_time_code(59.96), "01:00.0");
    }

    #[test]
    fn format_clamps_negative_and_nan() {
        assert_eq!(format_time_code(-10.0), "00:00.0");
        assert_eq!(format_time_code(f64::NAN), "00:00.0");
    }

    #[test]
    fn parse_plain_seconds() {
        assert_abs_diff_eq!(parse_time_code("90").unwrap(), 90.0);
        assert_abs_diff_eq!(parse_time_code(" 12.5 ").unwrap(), 12.5);
    }

    #[test]
    fn parse_minutes_seconds() {
        assert_abs_diff_eq!(parse_time_code("2:05").unwrap(), 125.0);
        assert_abs_diff_eq!(parse_time_code("02:05.2").unwrap(), 125.2);
    }

    #[test]
    fn parse_hours_minutes_seconds() {
        assert_abs_diff_eq!(parse_time_code("1:01:05.5").unwrap(), 3665.5);
    }

    #[test]
    fn parse_reads_back_formatted_values() {
        for secs in [0.0, 7.3, 125.2, 3599.9, 7322.4] {
            let parsed = parse_time_code(&format_time_code(secs)).unwrap();
            assert_abs_diff_eq!(parsed, secs, epsilon = 1e-9);
        }
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(parse_time_code("   "), Err(TimeCodeError::Empty));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_time_code("abc"),
            Err(TimeCodeError::Malformed(_))
        ));
        assert!(matches!(
            parse_time_code("-5"),
            Err(TimeCodeError::Malformed(_))
        ));
        assert!(matches!(
            parse_time_code("1e3"),
            Err(TimeCodeError::Malformed(_))
        ));
        assert!(matches!(
            parse_time_code("1:2:3:4"),
            Err(TimeCodeError::Malformed(_))
        ));
        assert!(matches!(
            parse_time_code("1:"),
            Err(TimeCodeError::Malformed(_))
        ));
        assert!(matches!(
            parse_time_code("5."),
            Err(TimeCodeError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_out_of_range_fields() {
        assert!(matches!(
            parse_time_code("1:75"),
            Err(TimeCodeError::FieldOutOfRange(_))
        ));
        assert!(matches!(
            parse_time_code("1:60:00"),
            Err(TimeCodeError::FieldOutOfRange(_))
        ));
    }

    #[test]
    fn parse_rejects_fields_that_overflow() {
        assert!(matches!(
            parse_time_code("9999999999999999999:00:00"),
            Err(TimeCodeError::FieldOutOfRange(_))
        ));
        assert!(matches!(
            parse_time_code("999999999999999999:00"),
            Err(TimeCodeError::FieldOutOfRange(_))
        ));
        // Too long for u64 at all.
        assert!(matches!(
            parse_time_code("99999999999999999999999:00"),
            Err(TimeCodeError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_non_finite_seconds() {
        let huge = "9".repeat(400);
        assert!(matches!(
            parse_time_code(&huge),
            Err(TimeCodeError::FieldOutOfRange(_))
        ));
    }

    #[test]
    fn error_keys() {
        assert_eq!(TimeCodeError::Empty.i18n_key(), "time-code-error-empty");
        assert_eq!(
            TimeCodeError::FieldOutOfRange(String::new()).i18n_key(),
            "time-code-error-out-of-range"
        );
    }
}
