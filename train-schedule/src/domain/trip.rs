//! Trip type.
//!
//! A `Trip` summarizes travel on one service between a boarding and an
//! alighting stop. It borrows the service, so a query result can always
//! reach back to the full record.

use chrono::Duration;

use super::{
    LegMetrics, Metric, ScheduleTime, ServiceRecord, Stop, StopIndex, TrainNumber, TripError, span,
};

/// Travel on one service between two of its stops.
///
/// # Invariants
///
/// - `board_idx <= alight_idx` (equal only for a single-stop service)
/// - Both indices are valid for the service's stops
#[derive(Debug, Clone)]
pub struct Trip<'a> {
    service: &'a ServiceRecord,
    board_idx: StopIndex,
    alight_idx: StopIndex,
    metrics: LegMetrics,
}

impl<'a> Trip<'a> {
    /// Construct a trip, validating the stop indices.
    ///
    /// Metrics are computed once here from the absolute, day-adjusted times
    /// and cumulative distances of the two stops.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either index is out of bounds or the alighting stop
    /// precedes the boarding stop.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_schedule::domain::{
    ///     ClassSet, RunningDays, ServiceRecord, StationCode, Stop, StopIndex, TrainNumber, Trip,
    /// };
    ///
    /// let mut ndls = Stop::new(StationCode::parse("NDLS").unwrap(), "New Delhi".into());
    /// ndls.departure = Some("16:55".into());
    /// ndls.cumulative_distance_km = Some(0);
    ///
    /// let mut hwh = Stop::new(StationCode::parse("HWH").unwrap(), "Howrah Jn".into());
    /// hwh.arrival = Some("09:55".into());
    /// hwh.day_offset = 1;
    /// hwh.cumulative_distance_km = Some(1447);
    ///
    /// let service = ServiceRecord::new(
    ///     TrainNumber::parse("12302").unwrap(),
    ///     "Howrah Rajdhani".into(),
    ///     vec![ndls, hwh],
    ///     RunningDays::DAILY,
    ///     "RAJ".into(),
    ///     ClassSet::parse_list("1A, 2A, 3A"),
    /// )
    /// .unwrap();
    ///
    /// let trip = Trip::new(&service, StopIndex(0), StopIndex(1)).unwrap();
    /// assert_eq!(trip.duration_minutes(), Some(17 * 60));
    /// assert_eq!(trip.distance_km(), &Ok(1447));
    /// ```
    pub fn new(
        service: &'a ServiceRecord,
        board_idx: StopIndex,
        alight_idx: StopIndex,
    ) -> Result<Self, TripError> {
        if alight_idx < board_idx {
            return Err(TripError::Backwards);
        }

        let board = service
            .stop(board_idx)
            .ok_or(TripError::StopOutOfRange(board_idx))?;
        let alight = service
            .stop(alight_idx)
            .ok_or(TripError::StopOutOfRange(alight_idx))?;

        let metrics = span(board, alight);

        Ok(Trip {
            service,
            board_idx,
            alight_idx,
            metrics,
        })
    }

    /// A trip over the whole run, origin to terminus.
    pub fn full_run(service: &'a ServiceRecord) -> Self {
        let (board_idx, board) = service.origin();
        let (alight_idx, alight) = service.terminus();

        Trip {
            service,
            board_idx,
            alight_idx,
            metrics: span(board, alight),
        }
    }

    /// Returns the service this trip is on.
    pub fn service(&self) -> &'a ServiceRecord {
        self.service
    }

    /// Returns the train number of the owning service.
    pub fn number(&self) -> &'a TrainNumber {
        self.service.number()
    }

    pub fn board_idx(&self) -> StopIndex {
        self.board_idx
    }

    pub fn alight_idx(&self) -> StopIndex {
        self.alight_idx
    }

    /// Returns the boarding stop.
    pub fn origin_stop(&self) -> &'a Stop {
        // Validated at construction
        &self.service.stops()[self.board_idx.0]
    }

    /// Returns the alighting stop.
    pub fn destination_stop(&self) -> &'a Stop {
        &self.service.stops()[self.alight_idx.0]
    }

    /// Departure from the boarding stop on the service's day axis.
    pub fn departure(&self) -> Metric<ScheduleTime> {
        self.origin_stop().scheduled_departure()
    }

    /// Arrival at the alighting stop on the service's day axis.
    pub fn arrival(&self) -> Metric<ScheduleTime> {
        self.destination_stop().scheduled_arrival()
    }

    pub fn metrics(&self) -> &LegMetrics {
        &self.metrics
    }

    pub fn duration(&self) -> &Metric<Duration> {
        &self.metrics.duration
    }

    /// Total duration in minutes, if available.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.metrics.duration_minutes()
    }

    pub fn distance_km(&self) -> &Metric<i64> {
        &self.metrics.distance_km
    }

    pub fn speed_kmh(&self) -> &Metric<i64> {
        &self.metrics.speed_kmh
    }

    /// Number of stops travelled past, including the alighting stop.
    pub fn stop_count(&self) -> usize {
        self.alight_idx.0 - self.board_idx.0
    }

    /// Returns true if the trip covers the service's whole run.
    pub fn is_full_run(&self) -> bool {
        self.board_idx == self.service.origin().0 && self.alight_idx == self.service.terminus().0
    }
}
