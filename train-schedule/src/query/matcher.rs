//! The generalized service matcher.
//!
//! Every query surface is one scan over the loaded services: a selection
//! predicate picks the boarding and alighting stops, then the day and class
//! filters run, and each surviving service yields a [`Trip`].

use std::fmt;

use tracing::debug;

use crate::domain::{ServiceRecord, StationCode, StopIndex, TrainNumber, Trip};

use super::filter::Filters;

/// Caller mistakes in a query request.
///
/// A query that matches nothing is not an error; it returns an empty list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Route origin and destination are the same station
    #[error("source and destination cannot be the same ({0})")]
    SameStation(StationCode),

    /// Text search with nothing to search for
    #[error("search text must not be empty")]
    EmptyQuery,
}

/// Which services a query selects, and between which stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Services calling at `origin` and later at `destination`
    Route {
        origin: StationCode,
        destination: StationCode,
    },
    /// Services calling at a station anywhere in their run
    Station(StationCode),
    /// Services whose number or name contains the text, ignoring case
    Text(String),
    /// Every service
    All,
}

impl Selection {
    /// The same selection with any search text trimmed and lower-cased.
    fn normalized(&self) -> Selection {
        match self {
            Selection::Text(text) => Selection::Text(text.trim().to_lowercase()),
            other => other.clone(),
        }
    }

    /// The trip this selection picks on a service, if it selects it.
    /// Search text must already be normalized.
    ///
    /// Route selections board at the first call at the origin and alight at
    /// the first call at the destination after that. All other selections
    /// cover the full run.
    fn select<'a>(&self, service: &'a ServiceRecord) -> Option<Trip<'a>> {
        match self {
            Selection::Route {
                origin,
                destination,
            } => {
                let (board, _) = service.find_stop(origin, StopIndex(0))?;
                let (alight, _) = service.find_stop(destination, board.next())?;
                Trip::new(service, board, alight).ok()
            }
            Selection::Station(station) => service
                .calls_at(station)
                .then(|| Trip::full_run(service)),
            Selection::Text(needle) => {
                text_matches(service, needle).then(|| Trip::full_run(service))
            }
            Selection::All => Some(Trip::full_run(service)),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Route {
                origin,
                destination,
            } => write!(f, "route {origin} -> {destination}"),
            Selection::Station(station) => write!(f, "station {station}"),
            Selection::Text(text) => write!(f, "text {text:?}"),
            Selection::All => f.write_str("all"),
        }
    }
}

fn text_matches(service: &ServiceRecord, needle: &str) -> bool {
    service.number().as_str().contains(needle) || service.name().to_lowercase().contains(needle)
}

/// A selection plus the filters to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub selection: Selection,
    pub filters: Filters,
}

impl QueryRequest {
    /// Create a new query request.
    pub fn new(selection: Selection, filters: Filters) -> Self {
        Self { selection, filters }
    }

    /// Validate the query request.
    pub fn validate(&self) -> Result<(), QueryError> {
        match &self.selection {
            Selection::Route {
                origin,
                destination,
            } if origin == destination => Err(QueryError::SameStation(origin.clone())),
            Selection::Text(text) if text.trim().is_empty() => Err(QueryError::EmptyQuery),
            _ => Ok(()),
        }
    }
}

/// Validate a request and scan all services with it.
///
/// Trips come back in the order of `services`.
pub fn run_query<'a>(
    services: &'a [ServiceRecord],
    request: &QueryRequest,
) -> Result<Vec<Trip<'a>>, QueryError> {
    request.validate()?;
    Ok(scan(services, &request.selection, &request.filters))
}

fn scan<'a>(
    services: &'a [ServiceRecord],
    selection: &Selection,
    filters: &Filters,
) -> Vec<Trip<'a>> {
    let selection = selection.normalized();
    let mut selected = 0usize;
    let trips: Vec<Trip<'a>> = services
        .iter()
        .filter_map(|service| selection.select(service))
        .inspect(|_| selected += 1)
        .filter(|trip| filters.matches(trip.service()))
        .collect();

    debug!(
        selection = %selection,
        scanned = services.len(),
        selected,
        matched = trips.len(),
        "query scan complete"
    );

    trips
}

/// Services running from `origin` to `destination`, in that direction.
///
/// # Errors
///
/// Returns `Err(QueryError::SameStation)` if the two codes are equal.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::{
///     ClassSet, RunningDays, ServiceRecord, StationCode, Stop, TrainNumber,
/// };
/// use train_schedule::query::{Filters, match_route};
///
/// let code = |s| StationCode::parse(s).unwrap();
/// let stops = ["NDLS", "CNB", "HWH"]
///     .into_iter()
///     .map(|c| Stop::new(code(c), c.into()))
///     .collect();
/// let service = ServiceRecord::new(
///     TrainNumber::parse("12302").unwrap(),
///     "Howrah Rajdhani".into(),
///     stops,
///     RunningDays::DAILY,
///     "RAJ".into(),
///     ClassSet::new(),
/// )
/// .unwrap();
/// let services = vec![service];
///
/// let trips = match_route(&services, &code("CNB"), &code("HWH"), &Filters::default()).unwrap();
/// assert_eq!(trips.len(), 1);
///
/// // Direction matters
/// let trips = match_route(&services, &code("HWH"), &code("CNB"), &Filters::default()).unwrap();
/// assert!(trips.is_empty());
/// ```
pub fn match_route<'a>(
    services: &'a [ServiceRecord],
    origin: &StationCode,
    destination: &StationCode,
    filters: &Filters,
) -> Result<Vec<Trip<'a>>, QueryError> {
    let request = QueryRequest::new(
        Selection::Route {
            origin: origin.clone(),
            destination: destination.clone(),
        },
        filters.clone(),
    );
    run_query(services, &request)
}

/// Services calling at a station, as full-run trips.
pub fn match_station<'a>(
    services: &'a [ServiceRecord],
    station: &StationCode,
    filters: &Filters,
) -> Vec<Trip<'a>> {
    scan(services, &Selection::Station(station.clone()), filters)
}

/// Services whose number or name contains `text`, ignoring case.
///
/// # Errors
///
/// Returns `Err(QueryError::EmptyQuery)` if `text` is blank.
pub fn match_query<'a>(
    services: &'a [ServiceRecord],
    text: &str,
    filters: &Filters,
) -> Result<Vec<Trip<'a>>, QueryError> {
    let request = QueryRequest::new(Selection::Text(text.to_string()), filters.clone());
    run_query(services, &request)
}

/// Every service passing the filters, as full-run trips.
pub fn match_all<'a>(services: &'a [ServiceRecord], filters: &Filters) -> Vec<Trip<'a>> {
    scan(services, &Selection::All, filters)
}

/// Look a service back up by its train number.
pub fn find_service<'a>(
    services: &'a [ServiceRecord],
    number: &TrainNumber,
) -> Option<&'a ServiceRecord> {
    services.iter().find(|service| service.number() == number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ServiceBuilder, code};

    #[test]
    fn validate_same_station() {
        let request = QueryRequest::new(
            Selection::Route {
                origin: code("CNB"),
                destination: code("cnb"),
            },
            Filters::default(),
        );
        assert_eq!(
            request.validate(),
            Err(QueryError::SameStation(code("CNB")))
        );
    }

    #[test]
    fn validate_empty_text() {
        let request = QueryRequest::new(Selection::Text("   ".into()), Filters::default());
        assert_eq!(request.validate(), Err(QueryError::EmptyQuery));

        let request = QueryRequest::new(Selection::Text("raj".into()), Filters::default());
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn station_and_all_always_valid() {
        let request = QueryRequest::new(Selection::Station(code("CNB")), Filters::default());
        assert!(request.validate().is_ok());

        let request = QueryRequest::new(Selection::All, Filters::default());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn search_text_normalized_before_scan() {
        assert_eq!(
            Selection::Text("  Howrah RAJ ".into()).normalized(),
            Selection::Text("howrah raj".into())
        );
        assert_eq!(Selection::All.normalized(), Selection::All);
        assert_eq!(
            Selection::Station(code("CNB")).normalized(),
            Selection::Station(code("CNB"))
        );
    }

    #[test]
    fn mixed_case_search_matches() {
        let services = vec![
            ServiceBuilder::new("12302", "Howrah Rajdhani")
                .stop("NDLS", "New Delhi", None, Some("16:55"), 0, Some(0))
                .stop("HWH", "Howrah Jn", Some("09:55"), None, 1, Some(1447))
                .build(),
        ];

        let trips = match_query(&services, "  RAJdhani ", &Filters::default()).unwrap();
        assert_eq!(trips.len(), 1);
    }

    #[test]
    fn selection_display() {
        let route = Selection::Route {
            origin: code("NDLS"),
            destination: code("HWH"),
        };
        assert_eq!(route.to_string(), "route NDLS -> HWH");
        assert_eq!(Selection::Station(code("CNB")).to_string(), "station CNB");
        assert_eq!(Selection::Text("raj".into()).to_string(), "text \"raj\"");
        assert_eq!(Selection::All.to_string(), "all");
    }

    #[test]
    fn query_error_display() {
        assert_eq!(
            QueryError::SameStation(code("CNB")).to_string(),
            "source and destination cannot be the same (CNB)"
        );
        assert_eq!(
            QueryError::EmptyQuery.to_string(),
            "search text must not be empty"
        );
    }
}
