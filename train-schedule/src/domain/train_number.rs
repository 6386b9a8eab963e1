//! Train number type.

use std::fmt;

/// Error returned when parsing an invalid train number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train number: {reason}")]
pub struct InvalidTrainNumber {
    reason: &'static str,
}

/// A validated train number (e.g. "12301").
///
/// Train numbers are digit strings and the unique key of a service.
/// Spreadsheet exports often render them as "12,301" or "12301.0";
/// parsing removes the thousands separators and a trailing ".0" so every
/// rendering of the same number compares equal.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::TrainNumber;
///
/// let tn = TrainNumber::parse("12,301").unwrap();
/// assert_eq!(tn.as_str(), "12301");
/// assert_eq!(TrainNumber::parse("12301.0").unwrap(), tn);
///
/// assert!(TrainNumber::parse("").is_err());
/// assert!(TrainNumber::parse("12A01").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainNumber(String);

impl TrainNumber {
    /// Parse a train number from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainNumber> {
        let cleaned: String = s.trim().chars().filter(|&c| c != ',').collect();
        let digits = cleaned.strip_suffix(".0").unwrap_or(&cleaned);

        if digits.is_empty() {
            return Err(InvalidTrainNumber {
                reason: "must not be empty",
            });
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTrainNumber {
                reason: "must contain only digits",
            });
        }

        Ok(TrainNumber(digits.to_string()))
    }

    /// Returns the train number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value, if it fits in a u64.
    pub fn value(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// Returns true if the number is in a superfast series.
    ///
    /// Superfast numbers start with `2`, or have `2` as the second digit
    /// after a leading `0`, `1` or `2`.
    pub fn is_superfast(&self) -> bool {
        let bytes = self.0.as_bytes();
        match bytes {
            [b'2', ..] => true,
            [first, b'2', ..] => *first <= b'2',
            _ => false,
        }
    }

    /// Returns true if the number is in the unreserved series (30000-59999).
    pub fn is_unreserved(&self) -> bool {
        self.value()
            .is_some_and(|value| (30_000..=59_999).contains(&value))
    }
}

impl fmt::Debug for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainNumber({})", self.0)
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Digit strings roundtrip unchanged
        #[test]
        fn roundtrip(s in "[0-9]{1,6}") {
            let parsed = TrainNumber::parse(&s).unwrap();
            prop_assert_eq!(parsed.as_str(), s.as_str());
        }

        /// Thousands separators never change the parsed number
        #[test]
        fn separators_ignored(n in 1000u32..100_000) {
            let plain = n.to_string();
            let (head, tail) = plain.split_at(plain.len() - 3);
            let grouped = format!("{},{}", head, tail);
            prop_assert_eq!(
                TrainNumber::parse(&grouped).unwrap(),
                TrainNumber::parse(&plain).unwrap()
            );
        }

        /// Strings containing letters are rejected
        #[test]
        fn letters_rejected(s in "[0-9]{0,3}[A-Za-z][0-9]{0,3}") {
            prop_assert!(TrainNumber::parse(&s).is_err());
        }
    }
}
