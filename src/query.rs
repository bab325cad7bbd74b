//! Query type for URIs.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::encoding::{self, Violation};
use crate::error::QueryError;

/// A validated query from a URI (without the leading `?`).
///
/// The query is stored as the raw component text, preserving its
/// percent-encoding and boundaries. [`Query::pairs`] offers a derived
/// `key=value` view over the common `&`-separated form; it is a view, not
/// the stored representation, and performs no decoding.
///
/// # Examples
///
/// ```
/// use strict_uri::Query;
///
/// let query = Query::parse("a=1&b=2&flag").unwrap();
/// assert_eq!(query.as_str(), "a=1&b=2&flag");
///
/// let pairs: Vec<_> = query.pairs().collect();
/// assert_eq!(pairs, [("a", Some("1")), ("b", Some("2")), ("flag", None)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Parses a query from a string (without the leading `?`).
    ///
    /// The empty query is valid and distinct from an absent one: `http://a?`
    /// carries an empty query.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the query contains a character outside its
    /// allowed set that is not part of a valid percent-encoding triplet.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        match encoding::check(input, encoding::QUERY) {
            Ok(()) => Ok(Self(input.to_string())),
            Err(Violation::Codec(e)) => Err(QueryError::PercentEncoding(e)),
            Err(Violation::Char { char, position }) => {
                Err(QueryError::InvalidChar { char, position })
            }
        }
    }

    /// Returns the raw query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the query text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a `key=value` view over the raw text: pairs separated by
    /// `&`, each split at its first `=`. A pair without `=` yields `None`
    /// for the value. Empty pairs (`a&&b`) are skipped. No percent-decoding
    /// is performed; decode with
    /// [`percent_decode`](crate::encoding::percent_decode) where needed.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.split('&').filter(|pair| !pair.is_empty()).map(|pair| {
            match pair.find('=') {
                Some(i) => (&pair[..i], Some(&pair[i + 1..])),
                None => (pair, None),
            }
        })
    }

    /// Returns the canonical form with normalized percent-encoding.
    pub(crate) fn normalized(&self) -> Self {
        Self(encoding::normalize_pct(&self.0, false))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Query {
    type Error = QueryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl Deref for Query {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialOrd for Query {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Query {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
