//! Main URI type.

use std::fmt;
use std::str::FromStr;

use crate::authority::Authority;
use crate::error::{ParseError, ParseErrorKind, ResolveError};
use crate::fragment::Fragment;
use crate::host::Host;
use crate::path::Path;
use crate::query::Query;
use crate::resolve;
use crate::scheme::Scheme;

/// A parsed and validated URI or relative reference.
///
/// # Structure
///
/// ```text
/// scheme://userinfo@host:port/path?query#fragment
/// ```
///
/// Every component except the path is optional; a `Uri` without a scheme is
/// a relative reference, usable only as the reference argument of
/// [`Uri::resolve`]. Values are immutable: parsing, normalization, and
/// resolution each produce a new value.
///
/// # Examples
///
/// ```
/// use strict_uri::Uri;
///
/// let uri = Uri::parse("https://alice@example.com:8443/a/b?k=v#top").unwrap();
/// assert_eq!(uri.scheme().unwrap().as_str(), "https");
/// assert_eq!(uri.authority().unwrap().userinfo(), Some("alice"));
/// assert_eq!(uri.port(), Some(8443));
/// assert_eq!(uri.path().to_string(), "/a/b");
/// assert_eq!(uri.query().unwrap().as_str(), "k=v");
/// assert_eq!(uri.fragment().unwrap().as_str(), "top");
///
/// // Scheme case is canonicalized at construction.
/// let uri = Uri::parse("HTTP://example.com/").unwrap();
/// assert_eq!(uri.scheme().unwrap().as_str(), "http");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Option<Scheme>,
    authority: Option<Authority>,
    path: Path,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl Uri {
    /// Parses a URI or relative reference from a string.
    ///
    /// Decomposition follows the delimiter priority of RFC 3986 §3: a `:`
    /// before any `/`, `?`, or `#` ends the scheme; `//` introduces the
    /// authority, which runs to the next `/`, `?`, `#`, or the end; the
    /// path runs to `?` or `#`; the query runs to `#`; the rest is the
    /// fragment. Each component is then validated against its grammar, and
    /// the first failure aborts the parse.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` carrying the input and the failing component's
    /// error kind. The empty string is rejected with
    /// [`ParseErrorKind::Empty`]; the empty relative reference, when
    /// needed, is built with [`UriBuilder`](crate::UriBuilder).
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        if input.is_empty() {
            return Err(ParseErrorKind::Empty);
        }

        let (scheme, rest) = Self::split_scheme(input)?;
        let (authority, rest) = Self::split_authority(rest)?;
        let (path, rest) = Self::split_path(rest)?;
        let (query, rest) = Self::split_query(rest)?;
        let fragment = Self::split_fragment(rest)?;

        Ok(Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    fn split_scheme(input: &str) -> Result<(Option<Scheme>, &str), ParseErrorKind> {
        // A ':' before any '/', '?', '#' must end a valid scheme: RFC 3986
        // forbids a colon in the first segment of a relative reference.
        match input.find([':', '/', '?', '#']) {
            Some(i) if input.as_bytes()[i] == b':' => {
                let scheme = Scheme::parse(&input[..i]).map_err(ParseErrorKind::from)?;
                Ok((Some(scheme), &input[i + 1..]))
            }
            _ => Ok((None, input)),
        }
    }

    fn split_authority(input: &str) -> Result<(Option<Authority>, &str), ParseErrorKind> {
        let Some(rest) = input.strip_prefix("//") else {
            return Ok((None, input));
        };
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let authority = Authority::parse(&rest[..end]).map_err(ParseErrorKind::from)?;
        Ok((Some(authority), &rest[end..]))
    }

    fn split_path(input: &str) -> Result<(Path, &str), ParseErrorKind> {
        let end = input.find(['?', '#']).unwrap_or(input.len());
        let path = Path::parse(&input[..end]).map_err(ParseErrorKind::from)?;
        Ok((path, &input[end..]))
    }

    fn split_query(input: &str) -> Result<(Option<Query>, &str), ParseErrorKind> {
        let Some(rest) = input.strip_prefix('?') else {
            return Ok((None, input));
        };
        let end = rest.find('#').unwrap_or(rest.len());
        let query = Query::parse(&rest[..end]).map_err(ParseErrorKind::from)?;
        Ok((Some(query), &rest[end..]))
    }

    fn split_fragment(input: &str) -> Result<Option<Fragment>, ParseErrorKind> {
        match input.strip_prefix('#') {
            Some(rest) => {
                let fragment = Fragment::parse(rest).map_err(ParseErrorKind::from)?;
                Ok(Some(fragment))
            }
            None => Ok(None),
        }
    }

    pub(crate) fn from_parts(
        scheme: Option<Scheme>,
        authority: Option<Authority>,
        path: Path,
        query: Option<Query>,
        fragment: Option<Fragment>,
    ) -> Self {
        Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        }
    }

    /// Returns the scheme, if present.
    #[must_use]
    pub const fn scheme(&self) -> Option<&Scheme> {
        self.scheme.as_ref()
    }

    /// Returns the authority, if present.
    #[must_use]
    pub const fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// Returns the path.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the query, if present.
    #[must_use]
    pub const fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub const fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Returns the authority's host, if present.
    #[must_use]
    pub fn host(&self) -> Option<&Host> {
        self.authority.as_ref().map(Authority::host)
    }

    /// Returns the authority's port, if present.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.authority.as_ref().and_then(Authority::port)
    }

    /// Returns true if this URI has a scheme.
    ///
    /// Only an absolute URI can serve as the base of a resolution.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Returns true if this is a relative reference (no scheme).
    #[must_use]
    pub const fn is_relative_reference(&self) -> bool {
        self.scheme.is_none()
    }

    /// Returns a new URI with the given query.
    #[must_use]
    pub fn with_query(&self, query: Query) -> Self {
        Self {
            query: Some(query),
            ..self.clone()
        }
    }

    /// Returns a new URI without a query.
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self {
            query: None,
            ..self.clone()
        }
    }

    /// Returns a new URI with the given fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::{Fragment, Uri};
    ///
    /// let uri = Uri::parse("http://example.com/doc").unwrap();
    /// let anchored = uri.with_fragment(Fragment::parse("s2").unwrap());
    /// assert_eq!(anchored.to_string(), "http://example.com/doc#s2");
    /// ```
    #[must_use]
    pub fn with_fragment(&self, fragment: Fragment) -> Self {
        Self {
            fragment: Some(fragment),
            ..self.clone()
        }
    }

    /// Returns a new URI without a fragment.
    #[must_use]
    pub fn without_fragment(&self) -> Self {
        Self {
            fragment: None,
            ..self.clone()
        }
    }

    /// Returns the canonical form of this URI.
    ///
    /// Normalization lowercases the host, decodes percent-encoded
    /// unreserved bytes, uppercases the remaining triplet hex digits,
    /// drops a port equal to the scheme's default, and removes dot
    /// segments from an absolute path when a scheme is present (removing
    /// them from a relative reference would change what it resolves to).
    /// The operation is total and idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let uri = Uri::parse("HTTP://Example.COM:80/a/%7Eb/../c").unwrap();
    /// assert_eq!(uri.normalize().to_string(), "http://example.com/a/c");
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        let default_port = self.scheme.as_ref().and_then(Scheme::default_port);
        let authority = self.authority.as_ref().map(|a| a.normalized(default_port));
        let mut path = self.path.normalized_pct();
        if self.scheme.is_some() && path.is_absolute() {
            path = path.remove_dot_segments();
        }
        Self {
            scheme: self.scheme.clone(),
            authority,
            path,
            query: self.query.as_ref().map(Query::normalized),
            fragment: self.fragment.as_ref().map(Fragment::normalized),
        }
    }

    /// Returns true if the two URIs are equivalent: identical
    /// component-wise after normalization.
    ///
    /// Case differences in the scheme or a registered name and unnecessary
    /// percent-encoding of unreserved characters do not affect
    /// equivalence. Differing percent-encoding of reserved characters does
    /// — encoding a reserved character changes meaning.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let a = Uri::parse("HTTP://Example.COM/").unwrap();
    /// let b = Uri::parse("http://example.com/").unwrap();
    /// assert!(a.equivalent(&b));
    ///
    /// let a = Uri::parse("http://x/a%2Fb").unwrap();
    /// let b = Uri::parse("http://x/a/b").unwrap();
    /// assert!(!a.equivalent(&b));
    /// ```
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.normalize() == other.normalize()
    }

    /// Resolves a reference against this base URI per RFC 3986 §5.3.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::BaseNotAbsolute`] if this URI has no scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    /// let reference = Uri::parse("../../g").unwrap();
    /// assert_eq!(base.resolve(&reference).unwrap().to_string(), "http://a/g");
    /// ```
    pub fn resolve(&self, reference: &Self) -> Result<Self, ResolveError> {
        resolve::resolve(self, reference)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{authority}")?;
        } else if self.path.starts_with_double_slash() {
            // Keep the text unambiguous: without this, the path's leading
            // "//" would re-parse as an authority.
            write!(f, "/.")?;
        }
        write!(f, "{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
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
    use crate::error::{HostError, PathError, PortError};

    #[test]
    fn parse_full_uri() {
        let uri = Uri::parse("https://u@example.com:8443/a/b?k=v#top").unwrap();
        assert_eq!(uri.scheme().unwrap().as_str(), "https");
        assert_eq!(uri.authority().unwrap().userinfo(), Some("u"));
        assert_eq!(uri.port(), Some(8443));
        assert_eq!(uri.path().to_string(), "/a/b");
        assert_eq!(uri.query().unwrap().as_str(), "k=v");
        assert_eq!(uri.fragment().unwrap().as_str(), "top");
    }

    #[test]
    fn parse_empty_returns_error() {
        let result = Uri::parse("");
        assert!(matches!(
            result,
            Err(ParseError { kind: ParseErrorKind::Empty, .. })
        ));
    }

    #[test]
    fn parse_scheme_case_is_canonicalized() {
        let uri = Uri::parse("HTTP://example.com").unwrap();
        assert_eq!(uri.scheme().unwrap().as_str(), "http");
    }

    #[test]
    fn parse_relative_reference() {
        let uri = Uri::parse("../g?x#y").unwrap();
        assert!(uri.is_relative_reference());
        assert!(uri.authority().is_none());
        assert_eq!(uri.path().to_string(), "../g");
        assert_eq!(uri.query().unwrap().as_str(), "x");
    }

    #[test]
    fn parse_network_path_reference() {
        let uri = Uri::parse("//example.com/a").unwrap();
        assert!(uri.scheme().is_none());
        assert!(uri.authority().is_some());
        assert_eq!(uri.path().to_string(), "/a");
    }

    #[test]
    fn parse_path_only_reference() {
        let uri = Uri::parse("/just/a/path").unwrap();
        assert!(uri.scheme().is_none());
        assert!(uri.authority().is_none());
    }

    #[test]
    fn parse_no_authority_rootless_path() {
        let uri = Uri::parse("mailto:user@example.com").unwrap();
        assert_eq!(uri.scheme().unwrap().as_str(), "mailto");
        assert!(uri.authority().is_none());
        assert_eq!(uri.path().to_string(), "user@example.com");
    }

    #[test]
    fn parse_colon_in_second_segment_is_not_a_scheme() {
        let uri = Uri::parse("a/b:c").unwrap();
        assert!(uri.scheme().is_none());
        assert_eq!(uri.path().to_string(), "a/b:c");
    }

    #[test]
    fn parse_invalid_scheme_prefix_fails() {
        // "1a:" cannot be a scheme, and a relative reference's first
        // segment cannot contain ':'.
        assert!(matches!(
            Uri::parse("1a:b"),
            Err(ParseError { kind: ParseErrorKind::InvalidScheme(_), .. })
        ));
    }

    #[test]
    fn parse_empty_authority() {
        let uri = Uri::parse("file:///etc/hosts").unwrap();
        let authority = uri.authority().unwrap();
        assert_eq!(authority.host(), &Host::RegisteredName(String::new()));
        assert_eq!(uri.path().to_string(), "/etc/hosts");
    }

    #[test]
    fn parse_authority_ends_at_path() {
        let uri = Uri::parse("http://example.com/a").unwrap();
        assert_eq!(uri.path().to_string(), "/a");
    }

    #[test]
    fn parse_authority_ends_at_query() {
        let uri = Uri::parse("http://example.com?q").unwrap();
        assert!(uri.path().is_empty());
        assert_eq!(uri.query().unwrap().as_str(), "q");
    }

    #[test]
    fn parse_fragment_may_contain_question_mark() {
        let uri = Uri::parse("http://a/p#x?y").unwrap();
        assert!(uri.query().is_none());
        assert_eq!(uri.fragment().unwrap().as_str(), "x?y");
    }

    #[test]
    fn parse_empty_query_and_fragment_are_present() {
        let uri = Uri::parse("http://a/p?#").unwrap();
        assert_eq!(uri.query().map(Query::as_str), Some(""));
        assert_eq!(uri.fragment().map(Fragment::as_str), Some(""));
    }

    #[test]
    fn parse_unterminated_ipv6_fails_as_host() {
        assert!(matches!(
            Uri::parse("http://[::1"),
            Err(ParseError { kind: ParseErrorKind::InvalidHost(HostError::Ipv6 { .. }), .. })
        ));
    }

    #[test]
    fn parse_port_out_of_range_fails() {
        assert!(matches!(
            Uri::parse("http://a:70000/"),
            Err(ParseError {
                kind: ParseErrorKind::InvalidPort(PortError::OutOfRange { .. }),
                ..
            })
        ));
    }

    #[test]
    fn parse_space_in_path_fails() {
        assert!(matches!(
            Uri::parse("http://x/a b"),
            Err(ParseError {
                kind: ParseErrorKind::InvalidPath(PathError::InvalidChar { char: ' ', .. }),
                ..
            })
        ));
    }

    #[test]
    fn parse_bad_pct_is_its_own_kind() {
        assert!(matches!(
            Uri::parse("http://x/a%2"),
            Err(ParseError { kind: ParseErrorKind::InvalidPercentEncoding(_), .. })
        ));
        assert!(matches!(
            Uri::parse("http://x/?a=%G1"),
            Err(ParseError { kind: ParseErrorKind::InvalidPercentEncoding(_), .. })
        ));
    }

    #[test]
    fn display_roundtrip() {
        for input in [
            "http://example.com/a/b?k=v#f",
            "https://u@[::1]:8443/",
            "mailto:user@example.com",
            "urn:isbn:0451450523",
            "//example.com/a",
            "../relative",
            "/rooted?q",
            "http://a/p?",
            "file:///etc/hosts",
        ] {
            let uri = Uri::parse(input).unwrap();
            assert_eq!(uri.to_string(), input);
            assert_eq!(Uri::parse(&uri.to_string()).unwrap(), uri);
        }
    }

    #[test]
    fn empty_path_with_authority_stays_empty() {
        let uri = Uri::parse("http://example.com").unwrap();
        assert!(uri.path().is_empty());
        assert_eq!(uri.to_string(), "http://example.com");
        assert_eq!(uri.normalize().to_string(), "http://example.com");
    }

    #[test]
    fn normalize_lowercases_host_and_strips_default_port() {
        let uri = Uri::parse("HTTP://User@Example.COM:80/a").unwrap();
        let normalized = uri.normalize();
        assert_eq!(normalized.to_string(), "http://User@example.com/a");
    }

    #[test]
    fn normalize_keeps_non_default_port() {
        let uri = Uri::parse("http://example.com:8080/").unwrap();
        assert_eq!(uri.normalize().to_string(), "http://example.com:8080/");
    }

    #[test]
    fn normalize_decodes_unreserved_and_uppercases_hex() {
        let uri = Uri::parse("http://a/%7eb/%2fc?%7e#%7e").unwrap();
        assert_eq!(uri.normalize().to_string(), "http://a/~b/%2Fc?~#~");
    }

    #[test]
    fn normalize_removes_dot_segments_with_scheme() {
        let uri = Uri::parse("http://a/b/c/../d/./e").unwrap();
        assert_eq!(uri.normalize().to_string(), "http://a/b/d/e");
    }

    #[test]
    fn normalize_keeps_dot_segments_in_relative_reference() {
        let uri = Uri::parse("../g").unwrap();
        assert_eq!(uri.normalize().to_string(), "../g");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in [
            "HTTP://Example.COM:80/%7eu/../a%2fb?x=%41#f%2e",
            "ftp://h:21/dir/file",
            "http://%31%32%37.0.0.1/",
        ] {
            let once = Uri::parse(input).unwrap().normalize();
            assert_eq!(once.normalize(), once);
        }
    }

    #[test]
    fn equivalent_ignores_case_and_needless_encoding() {
        let a = Uri::parse("HTTP://Example.COM/%7eb").unwrap();
        let b = Uri::parse("http://example.com/~b").unwrap();
        assert!(a.equivalent(&b));
    }

    #[test]
    fn equivalent_respects_reserved_encoding() {
        let a = Uri::parse("http://x/a%2Fb").unwrap();
        let b = Uri::parse("http://x/a/b").unwrap();
        assert!(!a.equivalent(&b));
    }

    #[test]
    fn equivalent_ignores_default_port() {
        let a = Uri::parse("http://example.com:80/").unwrap();
        let b = Uri::parse("http://example.com/").unwrap();
        assert!(a.equivalent(&b));
    }

    #[test]
    fn with_and_without_fragment() {
        let uri = Uri::parse("http://a/p").unwrap();
        let tagged = uri.with_fragment(Fragment::parse("s").unwrap());
        assert_eq!(tagged.to_string(), "http://a/p#s");
        assert_eq!(tagged.without_fragment(), uri);
    }

    #[test]
    fn with_and_without_query() {
        let uri = Uri::parse("http://a/p").unwrap();
        let queried = uri.with_query(Query::parse("k=v").unwrap());
        assert_eq!(queried.to_string(), "http://a/p?k=v");
        assert_eq!(queried.without_query(), uri);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let uri = Uri::parse("http://example.com/a?k=v").unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, "\"http://example.com/a?k=v\"");
        let back: Uri = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uri);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_invalid() {
        let result: Result<Uri, _> = serde_json::from_str("\"http://x/a b\"");
        assert!(result.is_err());
    }
}
