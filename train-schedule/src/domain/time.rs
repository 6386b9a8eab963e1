//! Schedule time handling.
//!
//! Timetables record times as "HH:MM" strings plus a day offset counted from
//! the service's first departure. This module parses the clock part and
//! combines it with the offset so that overnight services order and subtract
//! correctly.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day as printed in a timetable, with no date attached.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("23:50").unwrap();
/// assert_eq!(t.minutes_since_midnight(), 23 * 60 + 50);
/// assert_eq!(t.to_string(), "23:50");
///
/// // Single-digit hours are accepted
/// assert_eq!(ClockTime::parse_hhmm("7:05").unwrap().to_string(), "07:05");
///
/// assert!(ClockTime::parse_hhmm("24:00").is_err());
/// assert!(ClockTime::parse_hhmm("0750").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a clock time from hour and minute, if both are in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "H:MM" or "HH:MM" format.
    ///
    /// Leading and trailing whitespace is ignored.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let (hours, minutes) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        let hour = parse_digits(hours).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute =
            parse_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since 00:00.
    pub fn minutes_since_midnight(&self) -> i64 {
        i64::from(self.hour()) * 60 + i64::from(self.minute())
    }

    /// Returns the underlying chrono time.
    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A clock time placed on a service's day axis.
///
/// Day 0 is the calendar day the service leaves its origin. Ordering and
/// subtraction use the absolute minute count, so 00:10 on day 1 is after
/// 23:50 on day 0.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::{ClockTime, ScheduleTime};
///
/// let dep = ScheduleTime::new(0, ClockTime::parse_hhmm("23:50").unwrap());
/// let arr = ScheduleTime::new(1, ClockTime::parse_hhmm("00:10").unwrap());
///
/// assert!(arr > dep);
/// assert_eq!(arr.signed_duration_since(dep).num_minutes(), 20);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleTime {
    // Field order matters: derived Ord compares day first, then time.
    day_offset: u32,
    time: ClockTime,
}

impl ScheduleTime {
    /// Create a schedule time from a day offset and clock time.
    pub fn new(day_offset: u32, time: ClockTime) -> Self {
        Self { day_offset, time }
    }

    /// Returns the day offset.
    pub fn day_offset(&self) -> u32 {
        self.day_offset
    }

    /// Returns the clock time.
    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// Minutes since 00:00 on day 0.
    pub fn absolute_minutes(&self) -> i64 {
        i64::from(self.day_offset) * MINUTES_PER_DAY + self.time.minutes_since_midnight()
    }

    /// Returns the duration between two schedule times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        Duration::minutes(self.absolute_minutes() - other.absolute_minutes())
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime(day {} {})", self.day_offset, self.time)
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.time, f)
    }
}

/// Format a duration as "Xh Ym".
///
/// ```
/// use chrono::Duration;
/// use train_schedule::domain::format_duration;
///
/// assert_eq!(format_duration(Duration::minutes(20)), "0h 20m");
/// assert_eq!(format_duration(Duration::minutes(17 * 60 + 5)), "17h 5m");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{}h {}m", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Parse one or two ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
