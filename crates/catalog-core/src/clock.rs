//! Wall-clock access for entity timestamps.
//!
//! Timestamps are kept at microsecond precision, which is what a relational
//! store round-trips without loss.

use chrono::{DateTime, TimeDelta, Utc};

/// The current instant, truncated to microseconds.
pub fn now() -> DateTime<Utc> { truncate_micros(Utc::now()) }

/// Drop sub-microsecond precision from `at`.
pub fn truncate_micros(at: DateTime<Utc>) -> DateTime<Utc> {
  DateTime::from_timestamp_micros(at.timestamp_micros()).unwrap_or(at)
}

/// Return `candidate` if it is strictly after `previous`, otherwise the
/// instant one microsecond after `previous`.
///
/// Two clock reads in quick succession can return the same value (or go
/// backwards after an NTP adjustment); entity mutations use this so
/// `updated_at` always moves forward.
pub fn advance_past(
  previous: DateTime<Utc>,
  candidate: DateTime<Utc>,
) -> DateTime<Utc> {
  if candidate > previous {
    candidate
  } else {
    previous + TimeDelta::microseconds(1)
  }
}
