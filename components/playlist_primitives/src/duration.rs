//! Duration formatting and the nanosecond wire encoding
use std::time::Duration;

/// Format as `M:SS`, the way track lengths are shown in listings
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Format as `Hh Mm Ss`, dropping the hours when there are none
pub fn format_long_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}

/// Longest duration the nanosecond encoding can store
pub const MAX_DURATION: Duration = Duration::from_nanos(u64::MAX);

/// Whole seconds as a `Duration`, `None` past `MAX_DURATION`
pub fn checked_from_secs(seconds: u64) -> Option<Duration> {
    Some(Duration::from_secs(seconds)).filter(|d| *d <= MAX_DURATION)
}

/// Serde adapter storing a `Duration` as an integer count of nanoseconds
///
/// Use with `#[serde(with = "playlist_primitives::duration::nanos")]`.
pub mod nanos {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        serializer.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}
