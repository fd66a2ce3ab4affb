//! Clip range validation.
//!
//! Raw start/end text from the form is validated here before a job request
//! is ever constructed; the job client only sees ranges that passed.

use thiserror::Error;

use crate::timecode::{format_time, parse_time, TimeError};

/// Why a start/end pair was rejected.
///
/// The classification only selects a user-facing message; the hard contract
/// is that an invalid range never reaches the job client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid start time: {0}")]
    MalformedStart(TimeError),

    #[error("invalid end time: {0}")]
    MalformedEnd(TimeError),

    #[error("end time must be after start time")]
    EndNotAfterStart,
}

/// A validated clip range.
///
/// `start` is the caller's original text; `duration` is derived from the
/// parsed start/end pair and never independently entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRange {
    /// Start time as entered (MM:SS or HH:MM:SS)
    pub start: String,
    /// Derived duration in display form
    pub duration: String,
    /// Start time in seconds
    pub start_secs: u32,
    /// End time in seconds
    pub end_secs: u32,
}

impl ClipRange {
    /// Duration of the range in seconds. Always strictly positive.
    pub fn duration_secs(&self) -> u32 {
        self.end_secs - self.start_secs
    }
}

/// Validate a start/end time pair.
///
/// Both must parse under the time grammar and the end must be strictly
/// after the start; equal start/end is rejected.
///
/// # Examples
/// ```
/// use clipninja_models::range::validate_range;
/// let range = validate_range("01:00", "01:30").unwrap();
/// assert_eq!(range.duration, "00:30");
/// ```
pub fn validate_range(start_text: &str, end_text: &str) -> Result<ClipRange, RangeError> {
    let start_secs = parse_time(start_text).map_err(RangeError::MalformedStart)?;
    let end_secs = parse_time(end_text).map_err(RangeError::MalformedEnd)?;

    if end_secs <= start_secs {
        return Err(RangeError::EndNotAfterStart);
    }

    Ok(ClipRange {
        start: start_text.trim().to_string(),
        duration: format_time((end_secs - start_secs) as i64),
        start_secs,
        end_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range_derives_duration() {
        let range = validate_range("01:00", "01:30").unwrap();
        assert_eq!(range.start, "01:00");
        assert_eq!(range.duration, "00:30");
        assert_eq!(range.duration_secs(), 30);
    }

    #[test]
    fn test_hour_spanning_range() {
        let range = validate_range("00:30:00", "02:00:00").unwrap();
        assert_eq!(range.duration, "01:30:00");
        assert_eq!(range.duration_secs(), 5400);
    }

    #[test]
    fn test_equal_times_rejected() {
        assert_eq!(
            validate_range("00:00", "00:00"),
            Err(RangeError::EndNotAfterStart)
        );
        assert_eq!(
            validate_range("01:30:00", "01:30:00"),
            Err(RangeError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_end_before_start_rejected() {
        assert_eq!(
            validate_range("02:00", "01:00"),
            Err(RangeError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_malformed_start_classified() {
        assert!(matches!(
            validate_range("oops", "01:00"),
            Err(RangeError::MalformedStart(_))
        ));
    }

    #[test]
    fn test_malformed_end_classified() {
        assert!(matches!(
            validate_range("01:00", "1:2:3:4"),
            Err(RangeError::MalformedEnd(_))
        ));
    }
}
