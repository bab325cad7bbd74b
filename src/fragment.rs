//! Fragment type for URIs.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::encoding::{self, Violation};
use crate::error::FragmentError;

/// A validated fragment from a URI (without the leading `#`).
///
/// # Examples
///
/// ```
/// use strict_uri::Fragment;
///
/// let frag = Fragment::parse("section-2.1").unwrap();
/// assert_eq!(frag.as_str(), "section-2.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    /// Parses a fragment from a string (without the leading `#`).
    ///
    /// The empty fragment is valid: `http://a#` carries one.
    ///
    /// # Errors
    ///
    /// Returns `FragmentError` if the fragment contains a character outside
    /// its allowed set that is not part of a valid percent-encoding triplet.
    pub fn parse(input: &str) -> Result<Self, FragmentError> {
        match encoding::check(input, encoding::FRAGMENT) {
            Ok(()) => Ok(Self(input.to_string())),
            Err(Violation::Codec(e)) => Err(FragmentError::PercentEncoding(e)),
            Err(Violation::Char { char, position }) => {
                Err(FragmentError::InvalidChar { char, position })
            }
        }
    }

    /// Returns the fragment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the canonical form with normalized percent-encoding.
    pub(crate) fn normalized(&self) -> Self {
        Self(encoding::normalize_pct(&self.0, false))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fragment {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Fragment {
    type Error = FragmentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl Deref for Fragment {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialOrd for Fragment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fragment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
