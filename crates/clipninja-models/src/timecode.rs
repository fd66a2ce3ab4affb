//! Time text parsing and formatting utilities.
//!
//! This module provides shared time handling for clip ranges, supporting
//! the `MM:SS` and `HH:MM:SS` forms used by the clip form and the worker
//! submission wire.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("empty time string")]
    Empty,

    #[error("invalid time format: {0}")]
    InvalidFormat(String),

    #[error("invalid {0} segment: {1}")]
    InvalidSegment(&'static str, String),

    #[error("{0} segment out of range: {1}")]
    OutOfRange(&'static str, u32),

    #[error("time value too large: {0}")]
    TooLarge(String),
}

fn segment(name: &'static str, text: &str) -> Result<u32, TimeError> {
    // `u32::from_str` rejects a leading '-', so negative segments fail here.
    text.parse()
        .map_err(|_| TimeError::InvalidSegment(name, text.to_string()))
}

fn bounded(name: &'static str, text: &str) -> Result<u32, TimeError> {
    let value = segment(name, text)?;
    if value > 59 {
        return Err(TimeError::OutOfRange(name, value));
    }
    Ok(value)
}

/// Parse a time string to total seconds.
///
/// Supports exactly two or three colon-separated segments:
/// - `MM:SS` — minutes and seconds each 0-59
/// - `HH:MM:SS` — hours unconstrained, minutes and seconds each 0-59
///
/// # Examples
/// ```
/// use clipninja_models::timecode::parse_time;
/// assert_eq!(parse_time("05:30").unwrap(), 330);
/// assert_eq!(parse_time("01:30:00").unwrap(), 5400);
/// ```
pub fn parse_time(text: &str) -> Result<u32, TimeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimeError::Empty);
    }

    let parts: Vec<&str> = text.split(':').collect();
    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes = bounded("minutes", minutes)?;
            let seconds = bounded("seconds", seconds)?;
            Ok(minutes * 60 + seconds)
        }
        [hours, minutes, seconds] => {
            let hours = segment("hours", hours)?;
            let minutes = bounded("minutes", minutes)?;
            let seconds = bounded("seconds", seconds)?;
            // Hours are unconstrained by the grammar, so the total can
            // exceed u32 seconds; widen before multiplying.
            let total = hours as u64 * 3600 + minutes as u64 * 60 + seconds as u64;
            u32::try_from(total).map_err(|_| TimeError::TooLarge(text.to_string()))
        }
        _ => Err(TimeError::InvalidFormat(text.to_string())),
    }
}

/// Format total seconds into the minimal display form.
///
/// Values of one hour or more use `HH:MM:SS`; shorter values use `MM:SS`.
/// Negative input formats to `"00:00"` as a safe display default, not an
/// error.
///
/// # Examples
/// ```
/// use clipninja_models::timecode::format_time;
/// assert_eq!(format_time(330), "05:30");
/// assert_eq!(format_time(5400), "01:30:00");
/// assert_eq!(format_time(-1), "00:00");
/// ```
pub fn format_time(total_secs: i64) -> String {
    if total_secs < 0 {
        return "00:00".to_string();
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Format total seconds into the 3-segment `HH:MM:SS` wire form.
///
/// The worker submission protocol always takes three segments; sub-hour
/// values gain a `00:` hour segment.
pub fn wire_time(total_secs: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}
