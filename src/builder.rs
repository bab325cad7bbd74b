//! Builder for constructing [`Uri`] values from components.

use std::fmt::Write;

use crate::authority::Authority;
use crate::error::{
    AuthorityError, FragmentError, HostError, ParseError, ParseErrorKind, PathError, QueryError,
    SchemeError,
};
use crate::encoding::{self, Violation};
use crate::fragment::Fragment;
use crate::host::Host;
use crate::path::Path;
use crate::query::Query;
use crate::scheme::Scheme;
use crate::uri::Uri;

/// A builder for [`Uri`] values.
///
/// The builder is a transient mutable draft: setters accumulate components,
/// and [`UriBuilder::build`] runs the same validation as [`Uri::parse`] —
/// including the cross-component invariants the grammar enforces
/// positionally — before producing an immutable value. The draft is consumed
/// either way; mutation never escapes into `Uri`.
///
/// Every component is optional, so `UriBuilder::new().build()` produces the
/// empty relative reference (which `Uri::parse` cannot, since the empty
/// string is rejected).
///
/// # Examples
///
/// ```
/// use strict_uri::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .try_scheme("https").unwrap()
///     .try_host("example.com").unwrap()
///     .port(8443)
///     .try_path("/a/b").unwrap()
///     .try_query("k=v").unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(uri.to_string(), "https://example.com:8443/a/b?k=v");
/// ```
#[derive(Debug, Clone, Default)]
pub struct UriBuilder {
    scheme: Option<Scheme>,
    userinfo: Option<String>,
    host: Option<Host>,
    port: Option<u16>,
    path: Path,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl UriBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Parses and sets the scheme from a string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError`] if the string is not a valid scheme.
    pub fn try_scheme(self, s: &str) -> Result<Self, SchemeError> {
        let scheme = Scheme::parse(s)?;
        Ok(self.scheme(scheme))
    }

    /// Sets the userinfo subcomponent after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError`] if the string contains a character outside
    /// the userinfo set or a malformed percent-encoding.
    pub fn try_userinfo(mut self, s: &str) -> Result<Self, AuthorityError> {
        match encoding::check(s, encoding::USERINFO) {
            Ok(()) => {
                self.userinfo = Some(s.to_string());
                Ok(self)
            }
            Err(Violation::Codec(e)) => Err(AuthorityError::PercentEncoding(e)),
            Err(Violation::Char { char, position }) => {
                Err(AuthorityError::InvalidUserinfoChar { char, position })
            }
        }
    }

    /// Sets the host.
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Parses and sets the host from a string (bracketed or not).
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the string is not a valid host.
    pub fn try_host(self, s: &str) -> Result<Self, HostError> {
        let host = Host::parse(s)?;
        Ok(self.host(host))
    }

    /// Sets the port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the port if provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_port(self, port: Option<u16>) -> Self {
        match port {
            Some(p) => self.port(p),
            None => self,
        }
    }

    /// Sets the path.
    #[must_use]
    pub fn path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Parses and sets the path from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if the string is not a valid path.
    pub fn try_path(self, s: &str) -> Result<Self, PathError> {
        let path = Path::parse(s)?;
        Ok(self.path(path))
    }

    /// Sets the query.
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Parses and sets the query from a string.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the string is not a valid query.
    pub fn try_query(self, s: &str) -> Result<Self, QueryError> {
        let query = Query::parse(s)?;
        Ok(self.query(query))
    }

    /// Sets the query if provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_query(self, query: Option<Query>) -> Self {
        match query {
            Some(q) => self.query(q),
            None => self,
        }
    }

    /// Sets the fragment.
    #[must_use]
    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.fragment = Some(fragment);
        self
    }

    /// Parses and sets the fragment from a string.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError`] if the string is not a valid fragment.
    pub fn try_fragment(self, s: &str) -> Result<Self, FragmentError> {
        let fragment = Fragment::parse(s)?;
        Ok(self.fragment(fragment))
    }

    /// Sets the fragment if provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_fragment(self, fragment: Option<Fragment>) -> Self {
        match fragment {
            Some(f) => self.fragment(f),
            None => self,
        }
    }

    /// Builds the final [`Uri`], checking the invariants that `parse`
    /// guarantees by position: userinfo and port require a host; with an
    /// authority the path must be empty or absolute; without one it must
    /// not begin with `//`; and without a scheme or authority the first
    /// segment of a relative path must not contain `:`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] carrying the draft's textual form and the
    /// violated invariant's kind.
    pub fn build(self) -> Result<Uri, ParseError> {
        let fail = |builder: &Self, kind: ParseErrorKind| ParseError {
            input: builder.draft_string(),
            kind,
        };

        if self.host.is_none() {
            if self.userinfo.is_some() {
                return Err(fail(
                    &self,
                    ParseErrorKind::InvalidAuthority(AuthorityError::UserinfoWithoutHost),
                ));
            }
            if self.port.is_some() {
                return Err(fail(
                    &self,
                    ParseErrorKind::InvalidAuthority(AuthorityError::PortWithoutHost),
                ));
            }
        }

        let has_authority = self.host.is_some();
        if has_authority && !self.path.is_empty() && !self.path.is_absolute() {
            return Err(fail(
                &self,
                ParseErrorKind::InvalidPath(PathError::RootlessWithAuthority),
            ));
        }
        if !has_authority && self.path.starts_with_double_slash() {
            return Err(fail(
                &self,
                ParseErrorKind::InvalidPath(PathError::DoubleSlashWithoutAuthority),
            ));
        }
        if self.scheme.is_none()
            && !has_authority
            && !self.path.is_absolute()
            && self.path.segments().first().is_some_and(|s| s.contains(':'))
        {
            return Err(fail(
                &self,
                ParseErrorKind::InvalidPath(PathError::ColonInFirstSegment),
            ));
        }

        let authority = self
            .host
            .map(|host| Authority::from_parts(self.userinfo, host, self.port));

        Ok(Uri::from_parts(
            self.scheme,
            authority,
            self.path,
            self.query,
            self.fragment,
        ))
    }

    /// Renders the draft as text for error reporting, without any
    /// invariant checking.
    fn draft_string(&self) -> String {
        let mut out = String::new();
        if let Some(scheme) = &self.scheme {
            let _ = write!(out, "{scheme}:");
        }
        if let Some(host) = &self.host {
            out.push_str("//");
            if let Some(userinfo) = &self.userinfo {
                let _ = write!(out, "{userinfo}@");
            }
            let _ = write!(out, "{host}");
            if let Some(port) = self.port {
                let _ = write!(out, ":{port}");
            }
        }
        let _ = write!(out, "{}", self.path);
        if let Some(query) = &self.query {
            let _ = write!(out, "?{query}");
        }
        if let Some(fragment) = &self.fragment {
            let _ = write!(out, "#{fragment}");
        }
        out
    }
}
