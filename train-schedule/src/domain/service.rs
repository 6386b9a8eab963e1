//! Scheduled service type.
//!
//! A `ServiceRecord` is one numbered service with its full, ordered stop
//! sequence. It is immutable once decoded; queries only ever borrow it.

use super::{ClassSet, DecodeError, RunningDays, StationCode, Stop, StopIndex, TrainNumber};

/// A scheduled service with its decoded stop sequence.
///
/// # Invariants
///
/// - `stops` is non-empty (enforced by [`ServiceRecord::new`])
/// - stops are in running order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    number: TrainNumber,
    name: String,
    stops: Vec<Stop>,
    running_days: RunningDays,
    service_type: String,
    classes: ClassSet,
}

impl ServiceRecord {
    /// Construct a service, rejecting an empty stop sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_schedule::domain::{
    ///     ClassSet, DecodeError, RunningDays, ServiceRecord, StationCode, Stop, TrainNumber,
    /// };
    ///
    /// let number = TrainNumber::parse("12301").unwrap();
    /// let stops = vec![
    ///     Stop::new(StationCode::parse("HWH").unwrap(), "Howrah Jn".into()),
    ///     Stop::new(StationCode::parse("NDLS").unwrap(), "New Delhi".into()),
    /// ];
    ///
    /// let service = ServiceRecord::new(
    ///     number.clone(),
    ///     "Rajdhani Express".into(),
    ///     stops,
    ///     RunningDays::DAILY,
    ///     "RAJ".into(),
    ///     ClassSet::parse_list("1A, 2A, 3A"),
    /// )
    /// .unwrap();
    /// assert_eq!(service.len(), 2);
    ///
    /// let empty = ServiceRecord::new(
    ///     number,
    ///     "Empty".into(),
    ///     vec![],
    ///     RunningDays::DAILY,
    ///     "RAJ".into(),
    ///     ClassSet::new(),
    /// );
    /// assert_eq!(empty.unwrap_err(), DecodeError::EmptyStopSequence);
    /// ```
    pub fn new(
        number: TrainNumber,
        name: String,
        stops: Vec<Stop>,
        running_days: RunningDays,
        service_type: String,
        classes: ClassSet,
    ) -> Result<Self, DecodeError> {
        if stops.is_empty() {
            return Err(DecodeError::EmptyStopSequence);
        }

        Ok(Self {
            number,
            name,
            stops,
            running_days,
            service_type,
            classes,
        })
    }

    /// Returns the train number.
    pub fn number(&self) -> &TrainNumber {
        &self.number
    }

    /// Returns the service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all stops in running order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns the stop at an index, if in bounds.
    pub fn stop(&self, idx: StopIndex) -> Option<&Stop> {
        self.stops.get(idx.0)
    }

    /// Returns the days the service runs.
    pub fn running_days(&self) -> RunningDays {
        self.running_days
    }

    /// Returns the service type tag (e.g. "SF", "RAJ", "MEX").
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Returns the classes offered.
    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    /// Find the first stop at a station at or after the given index.
    ///
    /// Returns both the index and the stop so callers can build trips
    /// unambiguously on services that revisit a station.
    pub fn find_stop(&self, station: &StationCode, after: StopIndex) -> Option<(StopIndex, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .skip(after.0)
            .find(|(_, stop)| &stop.station == station)
            .map(|(i, stop)| (StopIndex(i), stop))
    }

    /// Find all stops at a station.
    pub fn all_stops_at(&self, station: &StationCode) -> Vec<(StopIndex, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .filter(|(_, stop)| &stop.station == station)
            .map(|(i, stop)| (StopIndex(i), stop))
            .collect()
    }

    /// Does this service stop at the given station anywhere in its run?
    pub fn calls_at(&self, station: &StationCode) -> bool {
        self.stops.iter().any(|stop| &stop.station == station)
    }

    /// Returns the first stop (origin).
    pub fn origin(&self) -> (StopIndex, &Stop) {
        // Non-empty by construction
        (StopIndex(0), &self.stops[0])
    }

    /// Returns the last stop (terminus).
    pub fn terminus(&self) -> (StopIndex, &Stop) {
        let last = self.stops.len() - 1;
        (StopIndex(last), &self.stops[last])
    }

    /// Display label, "12301 - Rajdhani Express".
    pub fn label(&self) -> String {
        format!("{} - {}", self.number, self.name)
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ServiceBuilder, code};

    fn make_service() -> ServiceRecord {
        ServiceBuilder::new("12301", "Howrah Rajdhani")
            .stop("HWH", "Howrah Jn", None, Some("16:50"), 0, Some(0))
            .stop("DHN", "Dhanbad Jn", Some("20:22"), Some("20:27"), 0, Some(259))
            .stop("CNB", "Kanpur Central", Some("04:55"), Some("05:00"), 1, Some(1006))
            .stop("NDLS", "New Delhi", Some("10:00"), None, 1, Some(1447))
            .build()
    }

    #[test]
    fn accessors() {
        let service = make_service();

        assert_eq!(service.number().as_str(), "12301");
        assert_eq!(service.name(), "Howrah Rajdhani");
        assert_eq!(service.len(), 4);
        assert!(!service.is_empty());
        assert_eq!(service.label(), "12301 - Howrah Rajdhani");
        assert!(service.running_days().is_daily());
    }

    #[test]
    fn rejects_empty_stops() {
        let err = ServiceRecord::new(
            TrainNumber::parse("1").unwrap(),
            "Nothing".into(),
            vec![],
            RunningDays::DAILY,
            "PAS".into(),
            ClassSet::new(),
        )
        .unwrap_err();
        assert_eq!(err, DecodeError::EmptyStopSequence);
    }

    #[test]
    fn stop_lookup() {
        let service = make_service();

        assert_eq!(service.stop(StopIndex(2)).unwrap().station, code("CNB"));
        assert!(service.stop(StopIndex(10)).is_none());
    }

    #[test]
    fn find_stop() {
        let service = make_service();

        let (idx, stop) = service.find_stop(&code("CNB"), StopIndex(0)).unwrap();
        assert_eq!(idx, StopIndex(2));
        assert_eq!(stop.station_name, "Kanpur Central");

        // HWH is before index 1
        assert!(service.find_stop(&code("HWH"), StopIndex(1)).is_none());

        // Station not in service
        assert!(service.find_stop(&code("BCT"), StopIndex(0)).is_none());
    }

    #[test]
    fn find_stop_on_loop() {
        let service = ServiceBuilder::new("55001", "Circular")
            .stop("AAA", "A", None, Some("08:00"), 0, Some(0))
            .stop("BBB", "B", Some("08:30"), Some("08:32"), 0, Some(20))
            .stop("AAA", "A", Some("09:00"), None, 0, Some(40))
            .build();

        let (first, _) = service.find_stop(&code("AAA"), StopIndex(0)).unwrap();
        let (second, _) = service.find_stop(&code("AAA"), StopIndex(1)).unwrap();
        assert_eq!(first, StopIndex(0));
        assert_eq!(second, StopIndex(2));

        let all = service.all_stops_at(&code("AAA"));
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].0, StopIndex(2));
    }

    #[test]
    fn calls_at() {
        let service = make_service();

        assert!(service.calls_at(&code("HWH")));
        assert!(service.calls_at(&code("DHN")));
        assert!(service.calls_at(&code("NDLS")));
        assert!(!service.calls_at(&code("BCT")));
    }

    #[test]
    fn origin_and_terminus() {
        let service = make_service();

        let (origin_idx, origin) = service.origin();
        assert_eq!(origin_idx, StopIndex(0));
        assert_eq!(origin.station, code("HWH"));

        let (last_idx, last) = service.terminus();
        assert_eq!(last_idx, StopIndex(3));
        assert_eq!(last.station, code("NDLS"));
    }

    #[test]
    fn single_stop_service() {
        let service = ServiceBuilder::new("1", "Shunt")
            .stop("AAA", "A", None, None, 0, None)
            .build();

        assert_eq!(service.origin().0, service.terminus().0);
    }
}
