//! Trip ordering for query results.
//!
//! The matcher returns trips in service order. Callers that want a
//! particular order sort afterwards.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::Trip;

/// Error parsing a [`TripOrder`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip order {0:?}: expected \"departure\", \"duration\" or \"number\"")]
pub struct InvalidTripOrder(pub String);

/// Sort key for trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripOrder {
    /// Departure time of day at the boarding stop, earliest first
    #[default]
    Departure,
    /// Total duration, shortest first
    Duration,
    /// Train number, numerically
    TrainNumber,
}

impl FromStr for TripOrder {
    type Err = InvalidTripOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "departure" => Ok(TripOrder::Departure),
            "duration" => Ok(TripOrder::Duration),
            "number" | "train_number" => Ok(TripOrder::TrainNumber),
            _ => Err(InvalidTripOrder(s.to_string())),
        }
    }
}

impl fmt::Display for TripOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripOrder::Departure => f.write_str("departure"),
            TripOrder::Duration => f.write_str("duration"),
            TripOrder::TrainNumber => f.write_str("number"),
        }
    }
}

/// Sort trips by the given key.
///
/// Trips whose key is unavailable (missing or malformed time, non-numeric
/// number) sort after all others. The sort is stable, so ties keep their
/// input order.
pub fn sort_trips<'a>(mut trips: Vec<Trip<'a>>, order: TripOrder) -> Vec<Trip<'a>> {
    match order {
        TripOrder::Departure => {
            trips.sort_by(|a, b| {
                available_first(
                    a.departure().ok().map(|t| t.time()),
                    b.departure().ok().map(|t| t.time()),
                )
            });
        }
        TripOrder::Duration => {
            trips.sort_by(|a, b| available_first(a.duration_minutes(), b.duration_minutes()));
        }
        TripOrder::TrainNumber => {
            trips.sort_by(|a, b| {
                available_first(a.number().value(), b.number().value())
                    .then_with(|| a.number().cmp(b.number()))
            });
        }
    }

    trips
}

fn available_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
