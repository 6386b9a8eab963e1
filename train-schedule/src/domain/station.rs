//! Station code types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A station code such as "NDLS", "CNB" or "HWH".
///
/// Codes are short and unique within a network. Parsing trims surrounding
/// whitespace and upper-cases, so query input and timetable data compare
/// equal regardless of case.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::StationCode;
///
/// let ndls = StationCode::parse("NDLS").unwrap();
/// assert_eq!(ndls.as_str(), "NDLS");
///
/// // Case and surrounding whitespace are normalized
/// assert_eq!(StationCode::parse(" cnb ").unwrap().as_str(), "CNB");
///
/// // Empty and embedded whitespace are rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("NEW DELHI").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidStationCode {
                reason: "must not contain whitespace",
            });
        }

        Ok(StationCode(trimmed.to_uppercase()))
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
