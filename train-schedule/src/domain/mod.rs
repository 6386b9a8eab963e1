//! Domain types for the schedule engine.
//!
//! This module contains the core domain model types that represent
//! validated timetable data. Identifiers enforce their invariants at
//! construction time; times and distances stay as printed and are parsed
//! on demand into [`Metric`] values, so one bad field never hides a whole
//! service.

mod class;
mod error;
mod leg;
mod running_days;
mod service;
mod station;
mod stop;
mod time;
mod train_number;
mod trip;

pub use class::{ClassCode, ClassSet, InvalidClassCode};
pub use error::{DecodeError, Metric, TripError, Unavailable};
pub use leg::{LegMetrics, average_speed, leg, span, stoppage};
pub use running_days::{InvalidRunningDays, RunningDays, WEEK};
pub use service::ServiceRecord;
pub use station::{InvalidStationCode, StationCode};
pub use stop::{Stop, StopIndex};
pub use time::{ClockTime, MINUTES_PER_DAY, ScheduleTime, TimeError, format_duration};
pub use train_number::{InvalidTrainNumber, TrainNumber};
pub use trip::Trip;
