//! Station lookup.
//!
//! Station names come from the services themselves; there is no separate
//! station list. The first name seen for a code wins.

use std::collections::BTreeMap;

use crate::domain::{ServiceRecord, StationCode};

/// Station code → name lookup built from loaded services.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationIndex {
    names: BTreeMap<StationCode, String>,
}

impl StationIndex {
    /// Collect every station called at by any service.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_schedule::domain::{
    ///     ClassSet, RunningDays, ServiceRecord, StationCode, Stop, TrainNumber,
    /// };
    /// use train_schedule::stations::StationIndex;
    ///
    /// let cnb = StationCode::parse("CNB").unwrap();
    /// let service = ServiceRecord::new(
    ///     TrainNumber::parse("12302").unwrap(),
    ///     "Howrah Rajdhani".into(),
    ///     vec![Stop::new(cnb.clone(), "Kanpur Central".into())],
    ///     RunningDays::DAILY,
    ///     "RAJ".into(),
    ///     ClassSet::new(),
    /// )
    /// .unwrap();
    ///
    /// let index = StationIndex::from_services(&[service]);
    /// assert_eq!(index.label(&cnb).as_deref(), Some("CNB - Kanpur Central"));
    /// ```
    pub fn from_services(services: &[ServiceRecord]) -> Self {
        let mut names = BTreeMap::new();
        for stop in services.iter().flat_map(|s| s.stops()) {
            let entry = names
                .entry(stop.station.clone())
                .or_insert_with(String::new);
            // Prefer a real name over a blank one
            if entry.is_empty() {
                entry.clone_from(&stop.station_name);
            }
        }

        Self { names }
    }

    /// Look up a station name by code.
    pub fn name(&self, code: &StationCode) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// "CODE - Name" for a known station.
    pub fn label(&self, code: &StationCode) -> Option<String> {
        self.name(code).map(|name| format!("{code} - {name}"))
    }

    /// Every station's label, sorted by code.
    pub fn labels(&self) -> Vec<String> {
        self.names
            .iter()
            .map(|(code, name)| format!("{code} - {name}"))
            .collect()
    }

    /// Stations whose code or name contains `text`, ignoring case.
    ///
    /// An exact code match comes first.
    pub fn find(&self, text: &str) -> Vec<&StationCode> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut found: Vec<&StationCode> = self
            .names
            .iter()
            .filter(|(code, name)| {
                code.as_str().to_lowercase().contains(&needle)
                    || name.to_lowercase().contains(&needle)
            })
            .map(|(code, _)| code)
            .collect();

        if let Some(pos) = found
            .iter()
            .position(|code| code.as_str().eq_ignore_ascii_case(&needle))
        {
            let exact = found.remove(pos);
            found.insert(0, exact);
        }

        found
    }

    /// Get the number of stations in the lookup.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
