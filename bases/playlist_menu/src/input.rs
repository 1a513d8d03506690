use chrono::{Datelike, Utc};
use playlist_primitives::checked_from_secs;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("invalid duration {0:?}, use MM:SS")]
    Duration(String),
}

/// Reject blank input for a required field
pub fn required(field: &'static str, value: &str) -> Result<String, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InputError::Empty(field));
    }
    Ok(value.to_string())
}

/// Parse `MM:SS`; minutes may exceed 59, seconds may not
///
/// The total must fit the nanosecond storage encoding.
pub fn parse_duration(value: &str) -> Result<Duration, InputError> {
    let invalid = || InputError::Duration(value.to_string());

    let (minutes, seconds) = value.trim().split_once(':').ok_or_else(invalid)?;
    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
    if seconds >= 60 {
        return Err(invalid());
    }

    minutes
        .checked_mul(60)
        .and_then(|total| total.checked_add(seconds))
        .and_then(checked_from_secs)
        .ok_or_else(invalid)
}

/// Unparsable years fall back to the current one
pub fn parse_year(value: &str) -> u32 {
    value
        .trim()
        .parse()
        .unwrap_or_else(|_| Utc::now().year().unsigned_abs())
}
