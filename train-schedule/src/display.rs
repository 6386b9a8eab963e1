//! Display DTOs.
//!
//! The presentation boundary: every metric that is unavailable becomes the
//! sentinel [`UNAVAILABLE`] here and nowhere earlier.

use chrono::Duration;
use serde::Serialize;

use crate::domain::{LegMetrics, Metric, Stop, Trip, format_duration};
use crate::timetable::{Timetable, TimetableRow};

/// Shown in place of any value that could not be computed.
pub const UNAVAILABLE: &str = "-";

/// A timetable with its service header.
#[derive(Debug, Serialize)]
pub struct TimetableDto {
    pub number: String,
    pub name: String,
    pub running_days: String,
    pub service_type: String,
    pub classes: String,
    pub rows: Vec<TimetableRowDto>,
}

/// One stop of a timetable.
#[derive(Debug, Serialize)]
pub struct TimetableRowDto {
    /// 1-based position in the run
    pub position: usize,
    pub station_code: String,
    pub station_name: String,
    pub arrival: String,
    pub departure: String,
    pub day: u32,
    /// "N min"
    pub stoppage: String,
    /// Cumulative distance from the origin, km
    pub distance: String,
    /// "Xh Ym" to the next stop
    pub duration_to_next: String,
    pub distance_to_next: String,
    pub speed_to_next: String,
}

/// One trip in a list of query results.
#[derive(Debug, Serialize)]
pub struct TripRowDto {
    pub number: String,
    pub name: String,
    /// First stop of the service, "CODE - Name"
    pub origin: String,
    /// Last stop of the service, "CODE - Name"
    pub destination: String,
    pub running_days: String,
    pub service_type: String,
    pub classes: String,
    /// Station code where the trip boards
    pub board: String,
    /// Station code where the trip alights
    pub alight: String,
    pub departure: String,
    pub arrival: String,
    /// "Xh Ym"
    pub duration: String,
    /// km
    pub distance: String,
    /// km/h
    pub average_speed: String,
}

// Conversion implementations

impl TimetableDto {
    /// Convert a built timetable for display.
    pub fn from_timetable(timetable: &Timetable<'_>) -> Self {
        let service = timetable.service();
        Self {
            number: service.number().to_string(),
            name: service.name().to_string(),
            running_days: service.running_days().to_string(),
            service_type: service.service_type().to_string(),
            classes: service.classes().to_string(),
            rows: timetable
                .rows()
                .iter()
                .map(TimetableRowDto::from_row)
                .collect(),
        }
    }
}

impl TimetableRowDto {
    /// Convert one timetable row for display.
    pub fn from_row(row: &TimetableRow<'_>) -> Self {
        let stop = row.stop;
        let (duration_to_next, distance_to_next, speed_to_next) = match &row.next_leg {
            Some(leg) => leg_columns(leg),
            None => (
                UNAVAILABLE.to_string(),
                UNAVAILABLE.to_string(),
                UNAVAILABLE.to_string(),
            ),
        };

        Self {
            position: row.index.0 + 1,
            station_code: stop.station.to_string(),
            station_name: stop.station_name.clone(),
            arrival: time_text(stop.arrival.as_deref()),
            departure: time_text(stop.departure.as_deref()),
            day: stop.day_offset,
            stoppage: format_stoppage(&row.stoppage),
            distance: stop
                .cumulative_distance_km
                .map_or_else(|| UNAVAILABLE.to_string(), |km| km.to_string()),
            duration_to_next,
            distance_to_next,
            speed_to_next,
        }
    }
}

impl TripRowDto {
    /// Convert a query result for display.
    pub fn from_trip(trip: &Trip<'_>) -> Self {
        let service = trip.service();
        let (duration, distance, average_speed) = leg_columns(trip.metrics());

        Self {
            number: service.number().to_string(),
            name: service.name().to_string(),
            origin: stop_label(service.origin().1),
            destination: stop_label(service.terminus().1),
            running_days: service.running_days().to_string(),
            service_type: service.service_type().to_string(),
            classes: service.classes().to_string(),
            board: trip.origin_stop().station.to_string(),
            alight: trip.destination_stop().station.to_string(),
            departure: time_text(trip.origin_stop().departure.as_deref()),
            arrival: time_text(trip.destination_stop().arrival.as_deref()),
            duration,
            distance,
            average_speed,
        }
    }

    /// Convert a list of query results for display.
    pub fn from_trips(trips: &[Trip<'_>]) -> Vec<Self> {
        trips.iter().map(Self::from_trip).collect()
    }
}

/// Format a metric, or the sentinel if it is unavailable.
pub fn metric_text<T, F>(metric: &Metric<T>, format: F) -> String
where
    F: FnOnce(&T) -> String,
{
    metric
        .as_ref()
        .map_or_else(|_| UNAVAILABLE.to_string(), format)
}

/// Stoppage as "N min".
pub fn format_stoppage(stoppage: &Metric<Duration>) -> String {
    metric_text(stoppage, |d| format!("{} min", d.num_minutes()))
}

/// "CODE - Name" label for a stop.
pub fn stop_label(stop: &Stop) -> String {
    format!("{} - {}", stop.station, stop.station_name)
}

fn leg_columns(metrics: &LegMetrics) -> (String, String, String) {
    (
        metric_text(&metrics.duration, |d| format_duration(*d)),
        metric_text(&metrics.distance_km, i64::to_string),
        metric_text(&metrics.speed_kmh, i64::to_string),
    )
}

fn time_text(time: Option<&str>) -> String {
    time.map_or_else(|| UNAVAILABLE.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceRecord, StopIndex, Unavailable};
    use crate::test_support::ServiceBuilder;
    use crate::timetable::build_timetable;

    fn make_service() -> ServiceRecord {
        ServiceBuilder::new("12302", "Howrah Rajdhani")
            .stop("NDLS", "New Delhi", None, Some("16:55"), 0, Some(0))
            .stop("CNB", "Kanpur Central", Some("21:35"), Some("21:40"), 0, Some(440))
            .stop("HWH", "Howrah Jn", Some("09:55"), None, 1, None)
            .running_days("YNNNNNY")
            .classes("1A, 2A")
            .build()
    }

    #[test]
    fn timetable_rows() {
        let service = make_service();
        let dto = TimetableDto::from_timetable(&build_timetable(&service));

        assert_eq!(dto.number, "12302");
        assert_eq!(dto.running_days, "Sun, Sat");
        assert_eq!(dto.classes, "1A, 2A");
        assert_eq!(dto.rows.len(), 3);

        let first = &dto.rows[0];
        assert_eq!(first.position, 1);
        assert_eq!(first.arrival, "-");
        assert_eq!(first.departure, "16:55");
        assert_eq!(first.stoppage, "-");
        assert_eq!(first.distance, "0");
        assert_eq!(first.duration_to_next, "4h 40m");
        assert_eq!(first.distance_to_next, "440");
        assert_eq!(first.speed_to_next, "94");

        let second = &dto.rows[1];
        assert_eq!(second.stoppage, "5 min");
        // Terminus distance missing
        assert_eq!(second.duration_to_next, "12h 15m");
        assert_eq!(second.distance_to_next, "-");
        assert_eq!(second.speed_to_next, "-");

        let last = &dto.rows[2];
        assert_eq!(last.day, 1);
        assert_eq!(last.departure, "-");
        assert_eq!(last.distance, "-");
        assert_eq!(last.duration_to_next, "-");
    }

    #[test]
    fn trip_row() {
        let service = make_service();
        let trip = Trip::new(&service, StopIndex(1), StopIndex(2)).unwrap();
        let dto = TripRowDto::from_trip(&trip);

        assert_eq!(dto.number, "12302");
        assert_eq!(dto.origin, "NDLS - New Delhi");
        assert_eq!(dto.destination, "HWH - Howrah Jn");
        assert_eq!(dto.board, "CNB");
        assert_eq!(dto.alight, "HWH");
        assert_eq!(dto.departure, "21:40");
        assert_eq!(dto.arrival, "09:55");
        assert_eq!(dto.duration, "12h 15m");
        assert_eq!(dto.distance, "-");
        assert_eq!(dto.average_speed, "-");
    }

    #[test]
    fn trip_rows_serialize() {
        let service = make_service();
        let trips = vec![Trip::full_run(&service)];
        let json = serde_json::to_value(TripRowDto::from_trips(&trips)).unwrap();

        assert_eq!(json[0]["number"], "12302");
        assert_eq!(json[0]["departure"], "16:55");
        assert_eq!(json[0]["duration"], "17h 0m");
    }

    #[test]
    fn metric_sentinels() {
        assert_eq!(format_stoppage(&Ok(Duration::minutes(12))), "12 min");
        assert_eq!(format_stoppage(&Err(Unavailable::EqualTimes)), "-");
        assert_eq!(
            metric_text(&Err::<i64, _>(Unavailable::NonPositiveDuration), i64::to_string),
            "-"
        );
    }

    #[test]
    fn labels() {
        let service = make_service();
        assert_eq!(service.label(), "12302 - Howrah Rajdhani");
        assert_eq!(stop_label(&service.stops()[1]), "CNB - Kanpur Central");
    }
}
