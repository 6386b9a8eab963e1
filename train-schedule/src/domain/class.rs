//! Travel class codes.

use std::collections::BTreeSet;
use std::fmt;

/// Error returned when parsing an invalid class code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid class code: {reason}")]
pub struct InvalidClassCode {
    reason: &'static str,
}

/// A travel class offered by a service (e.g. "1A", "3A", "SL", "2S").
///
/// Codes are trimmed, upper-cased tokens. Anything except a blank token or
/// one containing the list separator is accepted.
///
/// # Examples
///
/// ```
/// use train_schedule::domain::ClassCode;
///
/// let sl = ClassCode::parse("sl").unwrap();
/// assert_eq!(sl.as_str(), "SL");
///
/// assert_eq!(ClassCode::parse("ev-a").unwrap().as_str(), "EV-A");
///
/// assert!(ClassCode::parse("").is_err());
/// assert!(ClassCode::parse("1A,2A").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassCode(String);

impl ClassCode {
    /// Parse a class code, trimming and upper-casing it.
    pub fn parse(s: &str) -> Result<Self, InvalidClassCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidClassCode {
                reason: "must not be empty",
            });
        }

        if trimmed.contains(',') {
            return Err(InvalidClassCode {
                reason: "must not contain a comma",
            });
        }

        Ok(ClassCode(trimmed.to_uppercase()))
    }

    /// Returns the class code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassCode({})", self.0)
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of classes a service offers, or a caller asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet(BTreeSet<ClassCode>);

impl ClassSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list such as "1A, 2A, 3A, SL".
    ///
    /// Blank tokens are skipped; every other token is kept.
    pub fn parse_list(s: &str) -> Self {
        s.split(',')
            .filter(|token| !token.trim().is_empty())
            .filter_map(|token| ClassCode::parse(token).ok())
            .collect()
    }

    /// Add a class to the set.
    pub fn insert(&mut self, code: ClassCode) -> bool {
        self.0.insert(code)
    }

    /// Returns true if the set contains the class.
    pub fn contains(&self, code: &ClassCode) -> bool {
        self.0.contains(code)
    }

    /// Returns true if the two sets share at least one class.
    pub fn intersects(&self, other: &ClassSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Iterate over the classes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassCode> {
        self.0.iter()
    }

    /// Returns the number of classes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ClassCode> for ClassSet {
    fn from_iter<I: IntoIterator<Item = ClassCode>>(iter: I) -> Self {
        ClassSet(iter.into_iter().collect())
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(code.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ClassCode {
        ClassCode::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_codes() {
        assert!(ClassCode::parse("1A").is_ok());
        assert!(ClassCode::parse("2A").is_ok());
        assert!(ClassCode::parse("3E").is_ok());
        assert!(ClassCode::parse("SL").is_ok());
        assert!(ClassCode::parse("CC").is_ok());
        assert!(ClassCode::parse("EC").is_ok());
        assert!(ClassCode::parse("EV-A").is_ok());
    }

    #[test]
    fn code_is_uppercased() {
        assert_eq!(code(" sl ").as_str(), "SL");
        assert_eq!(code("3a"), code("3A"));
    }

    #[test]
    fn reject_invalid_codes() {
        assert!(ClassCode::parse("").is_err());
        assert!(ClassCode::parse("  ").is_err());
        assert!(ClassCode::parse("1A,SL").is_err());
    }

    #[test]
    fn parse_list() {
        let set = ClassSet::parse_list("1A, 2A,3A ,sl");
        assert_eq!(set.len(), 4);
        assert!(set.contains(&code("1A")));
        assert!(set.contains(&code("SL")));
    }

    #[test]
    fn parse_list_skips_only_blank_tokens() {
        let set = ClassSet::parse_list(",1A,, ,SL,");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&code("1A")));
        assert!(set.contains(&code("SL")));

        assert!(ClassSet::parse_list("").is_empty());
    }

    #[test]
    fn parse_list_keeps_unusual_tokens() {
        let set = ClassSet::parse_list("EV-A, 2A, 3 e");
        assert_eq!(set.len(), 3);
        assert!(set.contains(&code("EV-A")));
        assert!(set.contains(&code("3 E")));
        assert_eq!(set.to_string(), "2A, 3 E, EV-A");
    }

    #[test]
    fn parse_list_deduplicates() {
        let set = ClassSet::parse_list("SL, sl, SL");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn intersects() {
        let offered = ClassSet::parse_list("2A, 3A, SL");

        assert!(offered.intersects(&ClassSet::parse_list("SL")));
        assert!(offered.intersects(&ClassSet::parse_list("1A, 3A")));
        assert!(!offered.intersects(&ClassSet::parse_list("1A, CC")));
        assert!(!offered.intersects(&ClassSet::new()));
    }

    #[test]
    fn display_sorted() {
        let set = ClassSet::parse_list("SL, 1A, 3A");
        assert_eq!(set.to_string(), "1A, 3A, SL");
        assert_eq!(ClassSet::new().to_string(), "");
    }
}
