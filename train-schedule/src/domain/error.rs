//! Domain error types.
//!
//! `Unavailable` explains why a derived metric has no value. It never aborts
//! a scan: callers carry it alongside the other metrics and resolve it to a
//! display sentinel at the presentation boundary. `DecodeError` is raised
//! while turning one wide record into a `ServiceRecord`; batch decoding logs
//! it and skips the record.

use super::{InvalidStationCode, InvalidTrainNumber, StopIndex, TimeError};

/// A derived value, or the reason it could not be computed.
pub type Metric<T> = Result<T, Unavailable>;

/// Why a stoppage, duration, distance or speed is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unavailable {
    /// A time or distance field is absent from the timetable
    #[error("missing {0}")]
    MissingField(&'static str),

    /// A time field is present but malformed
    #[error(transparent)]
    UnparsableTime(#[from] TimeError),

    /// Arrival and departure are the same, so there is no stoppage
    #[error("arrival equals departure")]
    EqualTimes,

    /// Speed needs a positive duration
    #[error("duration is not positive")]
    NonPositiveDuration,
}

/// Errors decoding a wide record into a service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The record has no decodable stops
    #[error("service has an empty stop sequence")]
    EmptyStopSequence,

    /// A required service-level field is absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The train number is not a digit string
    #[error(transparent)]
    InvalidTrainNumber(#[from] InvalidTrainNumber),

    /// A station code could not be parsed
    #[error(transparent)]
    InvalidStationCode(#[from] InvalidStationCode),
}

/// Errors constructing a trip over a service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    /// A stop index is beyond the end of the stop sequence
    #[error("stop index {0} out of range")]
    StopOutOfRange(StopIndex),

    /// The alighting stop comes before the boarding stop
    #[error("alight index must not be before board index")]
    Backwards,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, StationCode, TrainNumber};

    #[test]
    fn unavailable_display() {
        let err = Unavailable::MissingField("arrival");
        assert_eq!(err.to_string(), "missing arrival");

        let err = Unavailable::from(ClockTime::parse_hhmm("25:00").unwrap_err());
        assert_eq!(err.to_string(), "invalid time: hour must be 0-23");

        assert_eq!(
            Unavailable::EqualTimes.to_string(),
            "arrival equals departure"
        );
        assert_eq!(
            Unavailable::NonPositiveDuration.to_string(),
            "duration is not positive"
        );
    }

    #[test]
    fn decode_error_display() {
        assert_eq!(
            DecodeError::EmptyStopSequence.to_string(),
            "service has an empty stop sequence"
        );
        assert_eq!(
            DecodeError::MissingField("trainNumber").to_string(),
            "missing required field: trainNumber"
        );

        let err = DecodeError::from(TrainNumber::parse("").unwrap_err());
        assert_eq!(err.to_string(), "invalid train number: must not be empty");

        let err = DecodeError::from(StationCode::parse(" ").unwrap_err());
        assert_eq!(err.to_string(), "invalid station code: must not be empty");
    }

    #[test]
    fn trip_error_display() {
        assert_eq!(
            TripError::StopOutOfRange(StopIndex(7)).to_string(),
            "stop index 7 out of range"
        );
        assert_eq!(
            TripError::Backwards.to_string(),
            "alight index must not be before board index"
        );
    }

    #[test]
    fn metric_question_mark_converts_time_errors() {
        fn parse(s: &str) -> Metric<ClockTime> {
            Ok(ClockTime::parse_hhmm(s)?)
        }

        assert!(parse("10:00").is_ok());
        assert!(matches!(parse("xx"), Err(Unavailable::UnparsableTime(_))));
    }
}
