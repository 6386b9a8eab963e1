//! Leg metric calculation.
//!
//! Computes stoppage time at a stop and the duration, distance and average
//! speed between two stops of the same service. Every metric is a
//! [`Metric`]: a missing or malformed field makes that one value
//! unavailable and never aborts the caller.

use chrono::Duration;

use super::{ClockTime, MINUTES_PER_DAY, Metric, Stop, Unavailable};

/// Duration, distance and speed between two stops of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegMetrics {
    /// Departure at the first stop to arrival at the second
    pub duration: Metric<Duration>,
    /// Difference in cumulative distance, in kilometres
    pub distance_km: Metric<i64>,
    /// Average speed in km/h, rounded to the nearest integer
    pub speed_kmh: Metric<i64>,
}

impl LegMetrics {
    /// Duration in whole minutes, if available.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.duration.as_ref().ok().map(Duration::num_minutes)
    }
}

/// Time spent standing at a stop.
///
/// A departure clock time earlier than the arrival clock time means the
/// train leaves after midnight, so one day is added. The stop's day offset
/// is not consulted.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::{stoppage, StationCode, Stop, Unavailable};
///
/// let mut stop = Stop::new(StationCode::parse("MGS").unwrap(), "Mughal Sarai".into());
/// stop.arrival = Some("23:55".into());
/// stop.departure = Some("00:05".into());
/// assert_eq!(stoppage(&stop).unwrap().num_minutes(), 10);
///
/// stop.departure = Some("23:55".into());
/// assert_eq!(stoppage(&stop), Err(Unavailable::EqualTimes));
/// ```
pub fn stoppage(stop: &Stop) -> Metric<Duration> {
    let arrival_text = stop
        .arrival
        .as_deref()
        .ok_or(Unavailable::MissingField("arrival"))?;
    let departure_text = stop
        .departure
        .as_deref()
        .ok_or(Unavailable::MissingField("departure"))?;

    if arrival_text.trim() == departure_text.trim() {
        return Err(Unavailable::EqualTimes);
    }

    let arrival = ClockTime::parse_hhmm(arrival_text)?;
    let departure = ClockTime::parse_hhmm(departure_text)?;
    if arrival == departure {
        return Err(Unavailable::EqualTimes);
    }

    let mut minutes = departure.minutes_since_midnight() - arrival.minutes_since_midnight();
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }

    Ok(Duration::minutes(minutes))
}

/// Metrics for the leg between two adjacent stops.
///
/// Same computation as [`span`]; the name documents intent at call sites
/// walking a stop sequence pairwise.
pub fn leg(from: &Stop, to: &Stop) -> LegMetrics {
    span(from, to)
}

/// Metrics between any two stops of one service, `from` before `to`.
///
/// Duration uses the day-offset-adjusted departure at `from` and arrival at
/// `to`. If that comes out negative the recorded offsets understate the
/// elapsed time and one day is added. Distance is the difference of the two
/// cumulative distances, so totals over many stops never accumulate
/// per-leg rounding.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::{span, StationCode, Stop};
///
/// let mut a = Stop::new(StationCode::parse("AAA").unwrap(), "A".into());
/// a.departure = Some("23:50".into());
/// a.cumulative_distance_km = Some(100);
///
/// let mut b = Stop::new(StationCode::parse("BBB").unwrap(), "B".into());
/// b.arrival = Some("00:10".into());
/// b.day_offset = 1;
/// b.cumulative_distance_km = Some(130);
///
/// let metrics = span(&a, &b);
/// assert_eq!(metrics.duration_minutes(), Some(20));
/// assert_eq!(metrics.distance_km, Ok(30));
/// assert_eq!(metrics.speed_kmh, Ok(90));
/// ```
pub fn span(from: &Stop, to: &Stop) -> LegMetrics {
    let duration = elapsed(from, to);
    let distance_km = distance_between(from, to);
    let speed_kmh = match (&duration, &distance_km) {
        (Ok(duration), Ok(distance)) => average_speed(*duration, *distance),
        (Err(reason), _) | (_, Err(reason)) => Err(reason.clone()),
    };

    LegMetrics {
        duration,
        distance_km,
        speed_kmh,
    }
}

/// Average speed in km/h over a duration, rounded half away from zero.
pub fn average_speed(duration: Duration, distance_km: i64) -> Metric<i64> {
    let minutes = duration.num_minutes();
    if minutes <= 0 {
        return Err(Unavailable::NonPositiveDuration);
    }

    let hours = minutes as f64 / 60.0;
    Ok((distance_km as f64 / hours).round() as i64)
}

fn elapsed(from: &Stop, to: &Stop) -> Metric<Duration> {
    let departure = from.scheduled_departure()?;
    let arrival = to.scheduled_arrival()?;

    let mut minutes = arrival.absolute_minutes() - departure.absolute_minutes();
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }

    Ok(Duration::minutes(minutes))
}

fn distance_between(from: &Stop, to: &Stop) -> Metric<i64> {
    let start = from.distance_km()?;
    let end = to.distance_km()?;
    Ok(i64::from(end) - i64::from(start))
}
