//! Stop types for scheduled services.
//!
//! A `Stop` is one scheduled halt of a service, copied verbatim from the
//! timetable. A `StopIndex` gives an unambiguous position within a service's
//! stop sequence.

use super::{ClockTime, Metric, ScheduleTime, StationCode, Unavailable};

/// Index of a stop within a service's stop sequence.
///
/// Used instead of `StationCode` so that services visiting the same station
/// twice (loops, reversals) are still addressed unambiguously.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::StopIndex;
///
/// let idx = StopIndex(0);
/// assert_eq!(idx.next(), StopIndex(1));
/// assert_eq!(idx.prev(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Returns the next index.
    pub fn next(self) -> Self {
        StopIndex(self.0 + 1)
    }

    /// Returns the previous index, if any.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(StopIndex)
    }
}

impl std::fmt::Display for StopIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopIndex {
    fn from(value: usize) -> Self {
        StopIndex(value)
    }
}

impl From<StopIndex> for usize {
    fn from(value: StopIndex) -> Self {
        value.0
    }
}

/// A scheduled halt of a service.
///
/// Times are kept as the timetable printed them and parsed on demand, so a
/// malformed time only makes the metrics that need it unavailable.
///
/// # Time Semantics
///
/// - The origin has no arrival time and the terminus no departure time
/// - `day_offset` counts calendar days since the service's first departure
///   and applies to both the arrival and the departure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Station code
    pub station: StationCode,
    /// Station display name
    pub station_name: String,
    /// Arrival time as printed ("HH:MM")
    pub arrival: Option<String>,
    /// Departure time as printed ("HH:MM")
    pub departure: Option<String>,
    /// Days elapsed since the service's first departure
    pub day_offset: u32,
    /// Distance from the origin in kilometres
    pub cumulative_distance_km: Option<u32>,
}

impl Stop {
    /// Creates a stop with no times, day 0 and no distance.
    pub fn new(station: StationCode, station_name: String) -> Self {
        Self {
            station,
            station_name,
            arrival: None,
            departure: None,
            day_offset: 0,
            cumulative_distance_km: None,
        }
    }

    /// Parsed arrival time of day.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_schedule::domain::{Stop, StationCode, Unavailable};
    ///
    /// let mut stop = Stop::new(StationCode::parse("CNB").unwrap(), "Kanpur Central".into());
    /// assert_eq!(stop.arrival_time(), Err(Unavailable::MissingField("arrival")));
    ///
    /// stop.arrival = Some("04:55".into());
    /// assert_eq!(stop.arrival_time().unwrap().to_string(), "04:55");
    /// ```
    pub fn arrival_time(&self) -> Metric<ClockTime> {
        parse_field(self.arrival.as_deref(), "arrival")
    }

    /// Parsed departure time of day.
    pub fn departure_time(&self) -> Metric<ClockTime> {
        parse_field(self.departure.as_deref(), "departure")
    }

    /// Arrival placed on the service's day axis.
    pub fn scheduled_arrival(&self) -> Metric<ScheduleTime> {
        self.arrival_time()
            .map(|time| ScheduleTime::new(self.day_offset, time))
    }

    /// Departure placed on the service's day axis.
    pub fn scheduled_departure(&self) -> Metric<ScheduleTime> {
        self.departure_time()
            .map(|time| ScheduleTime::new(self.day_offset, time))
    }

    /// Cumulative distance from the origin.
    pub fn distance_km(&self) -> Metric<u32> {
        self.cumulative_distance_km
            .ok_or(Unavailable::MissingField("distance"))
    }
}

fn parse_field(value: Option<&str>, name: &'static str) -> Metric<ClockTime> {
    let text = value.ok_or(Unavailable::MissingField(name))?;
    Ok(ClockTime::parse_hhmm(text)?)
}
