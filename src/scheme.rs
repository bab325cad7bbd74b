//! Scheme type and the default-port table.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::SchemeError;

/// Well-known scheme default ports, consulted during normalization.
///
/// The table is process-wide, read-only, and never extended at runtime.
const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("ftp", 21),
    ("gopher", 70),
    ("http", 80),
    ("https", 443),
    ("ssh", 22),
    ("telnet", 23),
    ("ws", 80),
    ("wss", 443),
];

/// A validated URI scheme.
///
/// Schemes match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` and are
/// canonicalized to lowercase at construction, so two `Scheme` values
/// compare equal whenever RFC 3986 considers them the same scheme.
///
/// # Examples
///
/// ```
/// use strict_uri::Scheme;
///
/// let scheme = Scheme::parse("HTTP").unwrap();
/// assert_eq!(scheme.as_str(), "http");
/// assert_eq!(scheme.default_port(), Some(80));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scheme(String);

impl Scheme {
    /// Parses a scheme from a string (without the trailing `:`).
    ///
    /// # Errors
    ///
    /// Returns `SchemeError` if the input is empty, does not start with a
    /// letter, or contains a character outside the scheme grammar.
    pub fn parse(input: &str) -> Result<Self, SchemeError> {
        let mut chars = input.chars();
        let first = chars.next().ok_or(SchemeError::Empty)?;
        if !first.is_ascii_alphabetic() {
            return Err(SchemeError::MustStartWithLetter { found: first });
        }
        for (i, c) in input.char_indices().skip(1) {
            if !c.is_ascii_alphanumeric() && !matches!(c, '+' | '-' | '.') {
                return Err(SchemeError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self(input.to_ascii_lowercase()))
    }

    /// Returns the lowercase scheme text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the scheme's well-known default port, if it has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Scheme;
    ///
    /// assert_eq!(Scheme::parse("https").unwrap().default_port(), Some(443));
    /// assert_eq!(Scheme::parse("example").unwrap().default_port(), None);
    /// ```
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        DEFAULT_PORTS
            .iter()
            .find(|(name, _)| *name == self.0)
            .map(|&(_, port)| port)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Scheme {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Scheme {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Scheme {
    type Error = SchemeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Scheme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Scheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Scheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let scheme = Scheme::parse("http").unwrap();
        assert_eq!(scheme.as_str(), "http");
    }

    #[test]
    fn parse_lowercases() {
        let scheme = Scheme::parse("HtTp").unwrap();
        assert_eq!(scheme.as_str(), "http");
    }

    #[test]
    fn parse_with_plus_minus_dot() {
        assert!(Scheme::parse("git+ssh").is_ok());
        assert!(Scheme::parse("view-source").is_ok());
        assert!(Scheme::parse("soap.beep").is_ok());
    }

    #[test]
    fn parse_digits_after_first() {
        assert!(Scheme::parse("h2").is_ok());
    }

    #[test]
    fn parse_empty_fails() {
        assert!(matches!(Scheme::parse(""), Err(SchemeError::Empty)));
    }

    #[test]
    fn parse_digit_first_fails() {
        assert!(matches!(
            Scheme::parse("1http"),
            Err(SchemeError::MustStartWithLetter { found: '1' })
        ));
    }

    #[test]
    fn parse_invalid_char_fails() {
        assert!(matches!(
            Scheme::parse("ht_tp"),
            Err(SchemeError::InvalidChar { char: '_', position: 2 })
        ));
    }

    #[test]
    fn default_ports() {
        assert_eq!(Scheme::parse("http").unwrap().default_port(), Some(80));
        assert_eq!(Scheme::parse("HTTPS").unwrap().default_port(), Some(443));
        assert_eq!(Scheme::parse("wss").unwrap().default_port(), Some(443));
        assert_eq!(Scheme::parse("urn").unwrap().default_port(), None);
    }
}
