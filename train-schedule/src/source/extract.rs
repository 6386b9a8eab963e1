//! Stop sequence extraction and service decoding.
//!
//! Turns one wide record into a validated [`ServiceRecord`], decoding the
//! repeating stop columns once so queries never touch indexed fields.

use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::domain::{ClassSet, DecodeError, RunningDays, ServiceRecord, StationCode, Stop, TrainNumber};

use super::record::{
    FieldValue, JOURNEY_CLASSES, RUNNING_ON, TRAIN_NAME, TRAIN_NUMBER, TRAIN_TYPE, WideRecord,
    stop_column, stop_field,
};

/// Decode the ordered stop sequence of a wide record.
///
/// Scans stop indices from 1 up to `max_stop_index` and stops at the first
/// index whose code is absent. A code that is present but not a valid
/// station code skips that one stop. Times are copied verbatim; a missing
/// day offset defaults to 0.
///
/// # Examples
///
/// ```
/// use train_schedule::source::{RawServiceRecord, extract_stops};
///
/// let record = RawServiceRecord::new()
///     .with("station1_code", "NDLS")
///     .with("station1_dep", "16:55")
///     .with("station2_code", "CNB")
///     .with("station2_arr", "21:35")
///     .with("station3_name", "Orphan name after the last code");
///
/// let stops = extract_stops(&record, 1000);
/// assert_eq!(stops.len(), 2);
/// assert_eq!(stops[1].arrival.as_deref(), Some("21:35"));
/// ```
pub fn extract_stops<R: WideRecord + ?Sized>(record: &R, max_stop_index: usize) -> Vec<Stop> {
    let mut stops = Vec::new();

    for i in 1..=max_stop_index {
        let code_column = stop_column(i, stop_field::CODE);
        if record.is_absent(&code_column) {
            break;
        }
        let raw_code = record.text(&code_column).unwrap_or_default();
        let station = match StationCode::parse(&raw_code) {
            Ok(code) => code,
            Err(e) => {
                warn!(index = i, code = %raw_code, error = %e, "skipping stop with invalid station code");
                continue;
            }
        };

        let name = record
            .text(&stop_column(i, stop_field::NAME))
            .unwrap_or_default();
        let mut stop = Stop::new(station, name);
        stop.arrival = record.text(&stop_column(i, stop_field::ARRIVAL));
        stop.departure = record.text(&stop_column(i, stop_field::DEPARTURE));
        stop.day_offset = day_offset(record, i);
        stop.cumulative_distance_km = distance(record, i);

        stops.push(stop);
    }

    stops
}

fn day_offset<R: WideRecord + ?Sized>(record: &R, index: usize) -> u32 {
    let column = stop_column(index, stop_field::DAY);
    match record.whole_number(&column) {
        Some(day) => u32::try_from(day).unwrap_or_else(|_| {
            trace!(index, day, "negative day offset, defaulting to 0");
            0
        }),
        None => {
            if !record.is_absent(&column) {
                trace!(index, "unreadable day offset, defaulting to 0");
            }
            0
        }
    }
}

fn distance<R: WideRecord + ?Sized>(record: &R, index: usize) -> Option<u32> {
    let km = record.whole_number(&stop_column(index, stop_field::DISTANCE))?;
    match u32::try_from(km) {
        Ok(km) => Some(km),
        Err(_) => {
            trace!(index, km, "negative distance treated as missing");
            None
        }
    }
}

/// Decode one wide record into a service.
///
/// # Errors
///
/// Returns `Err` if the train number is missing or malformed, or if the
/// record has no stops. Other service-level fields fall back to empty
/// values rather than failing.
pub fn decode_service<R: WideRecord + ?Sized>(
    record: &R,
    max_stop_index: usize,
) -> Result<ServiceRecord, DecodeError> {
    let raw_number = record
        .text(TRAIN_NUMBER)
        .ok_or(DecodeError::MissingField(TRAIN_NUMBER))?;
    let number = TrainNumber::parse(&raw_number)?;

    let name = record.text(TRAIN_NAME).unwrap_or_else(|| {
        trace!(number = %number, "missing service name");
        String::new()
    });
    let running_days = running_days(record, &number);
    let service_type = record.text(TRAIN_TYPE).unwrap_or_else(|| {
        trace!(number = %number, "missing service type");
        String::new()
    });
    let classes = record
        .text(JOURNEY_CLASSES)
        .map(|list| ClassSet::parse_list(&list))
        .unwrap_or_default();

    let stops = extract_stops(record, max_stop_index);

    ServiceRecord::new(number, name, stops, running_days, service_type, classes)
}

fn running_days<R: WideRecord + ?Sized>(record: &R, number: &TrainNumber) -> RunningDays {
    match record.field(RUNNING_ON) {
        Some(FieldValue::Flags(flags)) => match <[bool; 7]>::try_from(flags.as_slice()) {
            Ok(flags) => RunningDays::from_flags(flags),
            Err(_) => {
                warn!(number = %number, len = flags.len(), "running-days flags need 7 entries");
                RunningDays::NONE
            }
        },
        Some(value) if !value.is_absent() => {
            let mask = value.as_text().unwrap_or_default();
            RunningDays::parse_mask(&mask).unwrap_or_else(|e| {
                warn!(number = %number, error = %e, "unreadable running days");
                RunningDays::NONE
            })
        }
        _ => {
            warn!(number = %number, "missing running days");
            RunningDays::NONE
        }
    }
}

/// Decode a batch of records, logging and skipping any that fail.
///
/// One malformed record never prevents results for the others.
pub fn decode_services<R: WideRecord>(records: &[R], config: &EngineConfig) -> Vec<ServiceRecord> {
    let mut services = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for (row, record) in records.iter().enumerate() {
        match decode_service(record, config.max_stop_index) {
            Ok(service) => services.push(service),
            Err(e) => {
                skipped += 1;
                let number = record.text(TRAIN_NUMBER).unwrap_or_default();
                warn!(row, number = %number, error = %e, "skipping record");
            }
        }
    }

    debug!(decoded = services.len(), skipped, "decoded services");
    services
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::source::RawServiceRecord;
    use crate::test_support::code_from_index;
    use proptest::prelude::*;

    proptest! {
        /// Every consecutive stop column before the first gap is decoded, in order
        #[test]
        fn extracts_prefix_before_gap(len in 0usize..60, gap in 0usize..5) {
            let mut record = RawServiceRecord::new();
            for i in 0..len {
                record.insert(stop_column(i + 1, stop_field::CODE), code_from_index(i).as_str());
            }
            // Stops beyond the gap are never reached
            for i in 0..3 {
                let idx = len + 2 + gap + i;
                record.insert(stop_column(idx, stop_field::CODE), "ZZZ");
            }

            let stops = extract_stops(&record, 1000);
            prop_assert_eq!(stops.len(), len);
            for (i, stop) in stops.iter().enumerate() {
                prop_assert_eq!(&stop.station, &code_from_index(i));
            }
        }
    }
}
