//! Program (operator/city) identifier.

use std::fmt;

/// Error returned when parsing an invalid program identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid program: {reason}")]
pub struct InvalidProgram {
    reason: &'static str,
}

/// A BCycle program, e.g. `madison`.
///
/// The program names both the feed path segment and the prefix the
/// feeds put in front of every station identifier.
///
/// # Examples
///
/// ```
/// use bcycle_finder::gbfs::Program;
///
/// let madison = Program::parse("madison").unwrap();
/// assert_eq!(madison.path_segment(), "bcycle_madison");
/// assert_eq!(madison.normalize_station_id("bcycle_madison_5"), "5");
///
/// assert!(Program::parse("").is_err());
/// assert!(Program::parse("new york").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Program(String);

impl Program {
    /// Parse a program identifier.
    ///
    /// Surrounding whitespace is ignored. The remainder must be non-empty
    /// and may only contain ASCII letters, digits, `-` and `_`, since it
    /// ends up in a URL path.
    pub fn parse(s: &str) -> Result<Self, InvalidProgram> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidProgram {
                reason: "must not be empty",
            });
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidProgram {
                reason: "must only contain ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(Program(trimmed.to_string()))
    }

    /// Returns the program identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The feed path segment, e.g. `bcycle_madison`.
    pub fn path_segment(&self) -> String {
        format!("bcycle_{}", self.0)
    }

    /// Prefix the feeds put on station identifiers, e.g. `bcycle_madison_`.
    pub fn station_prefix(&self) -> String {
        format!("bcycle_{}_", self.0)
    }

    /// Public website of the program.
    pub fn website(&self) -> String {
        format!("https://{}.bcycle.com/", self.0)
    }

    /// Strip the program prefix from a raw station identifier.
    ///
    /// Identifiers without the prefix are returned unchanged.
    pub fn normalize_station_id<'a>(&self, raw: &'a str) -> &'a str {
        let prefix = self.station_prefix();
        raw.strip_prefix(prefix.as_str()).unwrap_or(raw)
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({})", self.0)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Prefixed identifiers always normalize back to their suffix
        #[test]
        fn normalize_roundtrip(program in "[a-z]{1,12}", suffix in "[0-9]{1,6}") {
            let program = Program::parse(&program).unwrap();
            let raw = format!("{}{}", program.station_prefix(), suffix);
            prop_assert_eq!(program.normalize_station_id(&raw), suffix.as_str());
        }

        /// Identifiers without the prefix are left alone
        #[test]
        fn unprefixed_unchanged(id in "[0-9]{1,6}") {
            let program = Program::parse("madison").unwrap();
            prop_assert_eq!(program.normalize_station_id(&id), id.as_str());
        }
    }
}
