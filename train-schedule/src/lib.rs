//! Railway schedule engine.
//!
//! Loads wide per-service timetable records, normalizes them into ordered
//! stop sequences, and answers route, station and text queries with
//! per-leg and per-trip metrics.

pub mod config;
pub mod display;
pub mod domain;
pub mod overview;
pub mod query;
pub mod source;
pub mod stations;
pub mod timetable;

#[cfg(test)]
mod test_support;
