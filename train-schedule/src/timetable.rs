//! Timetable building.
//!
//! A timetable is one row per stop of a service, in running order, each
//! carrying the stop's stoppage and the leg to the next stop.

use chrono::Duration;

use crate::domain::{LegMetrics, Metric, ServiceRecord, Stop, StopIndex, leg, stoppage};

/// One row of a timetable.
#[derive(Debug, Clone)]
pub struct TimetableRow<'a> {
    /// Position of the stop in the service
    pub index: StopIndex,
    /// The stop as scheduled
    pub stop: &'a Stop,
    /// Time standing at the stop
    pub stoppage: Metric<Duration>,
    /// Leg to the next stop; `None` for the terminus
    pub next_leg: Option<LegMetrics>,
}

/// The full timetable of one service.
///
/// # Invariants
///
/// - exactly one row per stop, in the service's stop order
#[derive(Debug, Clone)]
pub struct Timetable<'a> {
    service: &'a ServiceRecord,
    rows: Vec<TimetableRow<'a>>,
}

impl<'a> Timetable<'a> {
    pub fn service(&self) -> &'a ServiceRecord {
        self.service
    }

    pub fn rows(&self) -> &[TimetableRow<'a>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the timetable of a service.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::{
///     ClassSet, RunningDays, ServiceRecord, StationCode, Stop, TrainNumber,
/// };
/// use train_schedule::timetable::build_timetable;
///
/// let mut ndls = Stop::new(StationCode::parse("NDLS").unwrap(), "New Delhi".into());
/// ndls.departure = Some("16:55".into());
/// let mut hwh = Stop::new(StationCode::parse("HWH").unwrap(), "Howrah Jn".into());
/// hwh.arrival = Some("09:55".into());
/// hwh.day_offset = 1;
///
/// let service = ServiceRecord::new(
///     TrainNumber::parse("12302").unwrap(),
///     "Howrah Rajdhani".into(),
///     vec![ndls, hwh],
///     RunningDays::DAILY,
///     "RAJ".into(),
///     ClassSet::new(),
/// )
/// .unwrap();
///
/// let timetable = build_timetable(&service);
/// assert_eq!(timetable.len(), 2);
/// assert_eq!(timetable.rows()[0].next_leg.as_ref().unwrap().duration_minutes(), Some(17 * 60));
/// assert!(timetable.rows()[1].next_leg.is_none());
/// ```
pub fn build_timetable(service: &ServiceRecord) -> Timetable<'_> {
    let stops = service.stops();

    let rows = stops
        .iter()
        .enumerate()
        .map(|(i, stop)| TimetableRow {
            index: StopIndex(i),
            stop,
            stoppage: stoppage(stop),
            next_leg: stops.get(i + 1).map(|next| leg(stop, next)),
        })
        .collect();

    Timetable { service, rows }
}
