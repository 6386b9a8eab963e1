//! Route, station and text queries over loaded services.
//!
//! One generalized matcher serves every query surface:
//!
//! - route: services calling at an origin and later at a destination
//! - station: services calling at a station anywhere in their run
//! - text: services whose number or name contains a search string
//!
//! Each match is filtered on running days and classes and summarized as a
//! [`Trip`](crate::domain::Trip) borrowing the service.

mod filter;
mod matcher;
mod rank;


pub use filter::{ClassFilter, DayFilter, DayMatch, Filters, InvalidDayMatch};
pub use matcher::{
    QueryError, QueryRequest, Selection, find_service, match_all, match_query, match_route,
    match_station, run_query,
};
pub use rank::{InvalidTripOrder, TripOrder, sort_trips};
