//! Shared builders for unit tests.

use crate::domain::{ClassSet, RunningDays, ServiceRecord, StationCode, Stop, TrainNumber};

pub fn code(s: &str) -> StationCode {
    StationCode::parse(s).unwrap()
}

/// Generate a distinct station code from an index: AAA, AAB, ..., AAZ, ABA, ...
pub fn code_from_index(i: usize) -> StationCode {
    let c1 = b'A' + ((i / 676) % 26) as u8;
    let c2 = b'A' + ((i / 26) % 26) as u8;
    let c3 = b'A' + (i % 26) as u8;
    code(&format!("{}{}{}", c1 as char, c2 as char, c3 as char))
}

/// Fluent builder for `ServiceRecord` test fixtures.
pub struct ServiceBuilder {
    number: String,
    name: String,
    stops: Vec<Stop>,
    running_days: RunningDays,
    service_type: String,
    classes: ClassSet,
}

impl ServiceBuilder {
    /// A daily "SF" service offering 2A, 3A and SL.
    pub fn new(number: &str, name: &str) -> Self {
        Self {
            number: number.to_string(),
            name: name.to_string(),
            stops: Vec::new(),
            running_days: RunningDays::DAILY,
            service_type: "SF".to_string(),
            classes: ClassSet::parse_list("2A, 3A, SL"),
        }
    }

    pub fn stop(
        mut self,
        station: &str,
        name: &str,
        arrival: Option<&str>,
        departure: Option<&str>,
        day_offset: u32,
        distance_km: Option<u32>,
    ) -> Self {
        let mut stop = Stop::new(code(station), name.to_string());
        stop.arrival = arrival.map(str::to_string);
        stop.departure = departure.map(str::to_string);
        stop.day_offset = day_offset;
        stop.cumulative_distance_km = distance_km;
        self.stops.push(stop);
        self
    }

    pub fn running_days(mut self, mask: &str) -> Self {
        self.running_days = RunningDays::parse_mask(mask).unwrap();
        self
    }

    pub fn service_type(mut self, service_type: &str) -> Self {
        self.service_type = service_type.to_string();
        self
    }

    pub fn classes(mut self, classes: &str) -> Self {
        self.classes = ClassSet::parse_list(classes);
        self
    }

    pub fn build(self) -> ServiceRecord {
        ServiceRecord::new(
            TrainNumber::parse(&self.number).unwrap(),
            self.name,
            self.stops,
            self.running_days,
            self.service_type,
            self.classes,
        )
        .unwrap()
    }
}
