//! Wide-record input and decoding.
//!
//! Timetable exports carry each service as one wide row with repeating,
//! numbered stop columns. This module defines that input contract, decodes
//! rows into [`ServiceRecord`](crate::domain::ServiceRecord)s once at load
//! time, and reads JSON record files.
//!
//! Key characteristics of the exports:
//! - Stop columns are 1-based (`station1_code`, `station2_code`, ...) and
//!   the first missing code ends the sequence
//! - Times are "HH:MM" local time; day offsets count days since departure
//! - Numeric cells may arrive as numbers or as numeric text

mod extract;
mod load;
mod record;

pub use extract::{decode_service, decode_services, extract_stops};
pub use load::{LoadError, load_services, read_records};
pub use record::{
    FieldValue, JOURNEY_CLASSES, RUNNING_ON, RawServiceRecord, TRAIN_NAME, TRAIN_NUMBER,
    TRAIN_TYPE, WideRecord, stop_column, stop_field,
};
