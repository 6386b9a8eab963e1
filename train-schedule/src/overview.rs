//! Network overview metrics.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{ServiceRecord, StationCode, TrainNumber};

/// Services sharing one service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub service_type: String,
    pub count: usize,
    /// Train numbers of this type, ascending
    pub numbers: Vec<String>,
}

/// Headline counts for a set of services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkOverview {
    /// Distinct train numbers
    pub services: usize,
    /// Distinct station codes called at
    pub stations: usize,
    /// Distinct superfast train numbers
    pub superfast: usize,
    /// Distinct service types
    pub service_types: usize,
    /// Services per type, most common first
    pub by_type: Vec<TypeCount>,
}

impl NetworkOverview {
    /// Summarize every service.
    pub fn from_services(services: &[ServiceRecord]) -> Self {
        Self::summarize(services.iter())
    }

    /// Summarize only unreserved services (train numbers 30000-59999).
    pub fn unreserved(services: &[ServiceRecord]) -> Self {
        Self::summarize(services.iter().filter(|s| s.number().is_unreserved()))
    }

    fn summarize<'a>(services: impl Iterator<Item = &'a ServiceRecord>) -> Self {
        let mut numbers: BTreeSet<&TrainNumber> = BTreeSet::new();
        let mut stations: BTreeSet<&StationCode> = BTreeSet::new();
        let mut by_type: BTreeMap<&str, BTreeSet<&TrainNumber>> = BTreeMap::new();

        for service in services {
            numbers.insert(service.number());
            stations.extend(service.stops().iter().map(|stop| &stop.station));
            by_type
                .entry(service.service_type())
                .or_default()
                .insert(service.number());
        }

        let superfast = numbers.iter().filter(|n| n.is_superfast()).count();

        let mut by_type: Vec<TypeCount> = by_type
            .into_iter()
            .map(|(service_type, numbers)| {
                let mut numbers: Vec<&TrainNumber> = numbers.into_iter().collect();
                numbers.sort_by_key(|n| (n.value(), n.as_str().to_string()));
                TypeCount {
                    service_type: service_type.to_string(),
                    count: numbers.len(),
                    numbers: numbers.iter().map(|n| n.to_string()).collect(),
                }
            })
            .collect();
        // Stable: equal counts stay in type order
        by_type.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            services: numbers.len(),
            stations: stations.len(),
            superfast,
            service_types: by_type.len(),
            by_type,
        }
    }
}
