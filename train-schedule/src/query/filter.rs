//! Running-days and class filters.
//!
//! Filters are plain immutable values passed into the matcher. An empty
//! selection never filters anything out.

use std::fmt;
use std::str::FromStr;

use crate::domain::{ClassSet, RunningDays, ServiceRecord};

/// Error parsing a [`DayMatch`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day match mode {0:?}: expected \"any\" or \"all\"")]
pub struct InvalidDayMatch(pub String);

/// How a multi-day selection combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayMatch {
    /// The service runs on at least one selected day
    #[default]
    Any,
    /// The service runs on every selected day
    All,
}

impl FromStr for DayMatch {
    type Err = InvalidDayMatch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("any") {
            Ok(DayMatch::Any)
        } else if trimmed.eq_ignore_ascii_case("all") {
            Ok(DayMatch::All)
        } else {
            Err(InvalidDayMatch(s.to_string()))
        }
    }
}

impl fmt::Display for DayMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayMatch::Any => f.write_str("any"),
            DayMatch::All => f.write_str("all"),
        }
    }
}

/// Which services pass on running days.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use train_schedule::domain::RunningDays;
/// use train_schedule::query::{DayFilter, DayMatch};
///
/// let mon_fri = RunningDays::parse_mask("NYNNNYN").unwrap();
/// let wanted = RunningDays::NONE.with(Weekday::Mon).with(Weekday::Tue);
///
/// assert!(DayFilter::days(wanted, DayMatch::Any).matches(mon_fri));
/// assert!(!DayFilter::days(wanted, DayMatch::All).matches(mon_fri));
/// assert!(!DayFilter::Daily.matches(mon_fri));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    /// Every service passes
    #[default]
    Unrestricted,
    /// Only services running all seven days
    Daily,
    /// Services matching a selection of days under the given mode
    Days { days: RunningDays, mode: DayMatch },
}

impl DayFilter {
    pub fn days(days: RunningDays, mode: DayMatch) -> Self {
        DayFilter::Days { days, mode }
    }

    /// Does a service with these running days pass?
    pub fn matches(&self, running: RunningDays) -> bool {
        match *self {
            DayFilter::Unrestricted => true,
            DayFilter::Daily => running.is_daily(),
            DayFilter::Days { days, .. } if days.is_empty() => true,
            DayFilter::Days {
                days,
                mode: DayMatch::Any,
            } => running.intersects(days),
            DayFilter::Days {
                days,
                mode: DayMatch::All,
            } => running.contains_all(days),
        }
    }

    /// Returns true if this filter lets every service through.
    pub fn is_unrestricted(&self) -> bool {
        match self {
            DayFilter::Unrestricted => true,
            DayFilter::Daily => false,
            DayFilter::Days { days, .. } => days.is_empty(),
        }
    }
}

/// Which services pass on travel classes.
///
/// A service passes if it offers any requested class. No requested classes
/// means every service passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassFilter(ClassSet);

impl ClassFilter {
    pub fn new(classes: ClassSet) -> Self {
        ClassFilter(classes)
    }

    /// Parse a comma-separated list such as "SL, 3A".
    pub fn parse(list: &str) -> Self {
        ClassFilter(ClassSet::parse_list(list))
    }

    /// Does a service offering these classes pass?
    pub fn matches(&self, offered: &ClassSet) -> bool {
        self.0.is_empty() || offered.intersects(&self.0)
    }

    pub fn requested(&self) -> &ClassSet {
        &self.0
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }
}

/// Day and class filters applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub days: DayFilter,
    pub classes: ClassFilter,
}

impl Filters {
    pub fn new(days: DayFilter, classes: ClassFilter) -> Self {
        Self { days, classes }
    }

    /// Does a service pass both filters?
    pub fn matches(&self, service: &ServiceRecord) -> bool {
        self.days.matches(service.running_days()) && self.classes.matches(service.classes())
    }
}
