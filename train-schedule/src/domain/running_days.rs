//! Days of the week a service runs.

use chrono::Weekday;
use std::fmt;

/// Error returned when parsing an invalid running-days mask or day list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid running days: {reason}")]
pub struct InvalidRunningDays {
    reason: String,
}

impl InvalidRunningDays {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The week in mask order, Sunday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const ALL_DAYS: u8 = 0b111_1111;

/// A set of weekdays, stored as one bit per day indexed Sun..Sat.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use train_schedule::domain::RunningDays;
///
/// let days = RunningDays::parse_mask("YNNNNYN").unwrap();
/// assert!(days.runs_on(Weekday::Sun));
/// assert!(days.runs_on(Weekday::Fri));
/// assert!(!days.runs_on(Weekday::Mon));
/// assert_eq!(days.to_string(), "Sun, Fri");
///
/// assert!(RunningDays::parse_mask("YYYYYYY").unwrap().is_daily());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RunningDays(u8);

impl RunningDays {
    /// Runs on no day.
    pub const NONE: RunningDays = RunningDays(0);

    /// Runs every day of the week.
    pub const DAILY: RunningDays = RunningDays(ALL_DAYS);

    /// Build from seven flags indexed Sun..Sat.
    pub fn from_flags(flags: [bool; 7]) -> Self {
        flags
            .iter()
            .zip(WEEK)
            .filter(|(runs, _)| **runs)
            .fold(Self::NONE, |days, (_, day)| days.with(day))
    }

    /// Parse a 7-character mask indexed Sun..Sat.
    ///
    /// `Y`, `y` and `1` mark a running day; `N`, `n` and `0` mark a day off.
    pub fn parse_mask(s: &str) -> Result<Self, InvalidRunningDays> {
        let s = s.trim();
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 7 {
            return Err(InvalidRunningDays::new(format!(
                "mask must have 7 positions, got {}",
                chars.len()
            )));
        }

        let mut flags = [false; 7];
        for (flag, c) in flags.iter_mut().zip(chars) {
            *flag = match c {
                'Y' | 'y' | '1' => true,
                'N' | 'n' | '0' => false,
                other => {
                    return Err(InvalidRunningDays::new(format!(
                        "unexpected mask character {other:?}"
                    )));
                }
            };
        }

        Ok(Self::from_flags(flags))
    }

    /// Parse a comma-separated day list such as "Mon, Tue" or "daily".
    ///
    /// Day names are matched case-insensitively, in short or long form.
    pub fn parse_day_list(s: &str) -> Result<Self, InvalidRunningDays> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("daily") {
            return Ok(Self::DAILY);
        }

        s.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_fold(Self::NONE, |days, token| {
                token
                    .parse::<Weekday>()
                    .map(|day| days.with(day))
                    .map_err(|_| InvalidRunningDays::new(format!("unknown day {token:?}")))
            })
    }

    /// Returns a copy with the given day added.
    pub fn with(self, day: Weekday) -> Self {
        RunningDays(self.0 | bit(day))
    }

    /// Returns true if the service runs on the given day.
    pub fn runs_on(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    /// Returns true if the service runs on all seven days.
    pub fn is_daily(&self) -> bool {
        self.0 == ALL_DAYS
    }

    /// Returns true if no day is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if every day in `other` is also in `self`.
    pub fn contains_all(&self, other: RunningDays) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the two sets share at least one day.
    pub fn intersects(&self, other: RunningDays) -> bool {
        self.0 & other.0 != 0
    }

    /// Number of days set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the days set, Sunday first.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|day| self.runs_on(*day))
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

impl fmt::Debug for RunningDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunningDays({:07b})", self.0.reverse_bits() >> 1)
    }
}

impl fmt::Display for RunningDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, day) in self.days().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{day}")?;
        }
        Ok(())
    }
}
