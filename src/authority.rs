//! Authority type: the `userinfo@host:port` component.

use std::fmt;
use std::str::FromStr;

use crate::encoding::{self, Violation};
use crate::error::{AuthorityError, HostError, PortError};
use crate::host::Host;

/// A validated URI authority.
///
/// The authority follows `//` and consists of an optional userinfo, a host,
/// and an optional port. The userinfo is stored as written (percent-encoding
/// preserved); [`Authority::user`] and [`Authority::password`] are derived
/// views split at its first `:`.
///
/// # Examples
///
/// ```
/// use strict_uri::Authority;
///
/// let auth = Authority::parse("alice@example.com:8080").unwrap();
/// assert_eq!(auth.userinfo(), Some("alice"));
/// assert_eq!(auth.port(), Some(8080));
///
/// let auth = Authority::parse("[::1]").unwrap();
/// assert!(auth.port().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    userinfo: Option<String>,
    host: Host,
    port: Option<u16>,
}

impl Authority {
    /// Parses an authority from a string (without the leading `//`).
    ///
    /// The userinfo ends at the last `@`; the port separator is the last
    /// `:` outside an IP literal's brackets. An empty port span (`host:`)
    /// is treated as no port, matching the `*DIGIT` grammar.
    ///
    /// # Errors
    ///
    /// Returns `AuthorityError`, wrapping host and port failures in their
    /// own variants.
    pub fn parse(input: &str) -> Result<Self, AuthorityError> {
        let (userinfo, rest) = match input.rfind('@') {
            Some(at) => {
                let userinfo = &input[..at];
                match encoding::check(userinfo, encoding::USERINFO) {
                    Ok(()) => {}
                    Err(Violation::Codec(e)) => return Err(AuthorityError::PercentEncoding(e)),
                    Err(Violation::Char { char, position }) => {
                        return Err(AuthorityError::InvalidUserinfoChar { char, position });
                    }
                }
                (Some(userinfo.to_string()), &input[at + 1..])
            }
            None => (None, input),
        };

        let (host, port) = if rest.starts_with('[') {
            let close = rest.find(']').ok_or(AuthorityError::Host(HostError::Ipv6 {
                value: rest.to_string(),
                reason: "missing closing bracket",
            }))?;
            let host = Host::parse_ip_literal(&rest[1..close]).map_err(AuthorityError::Host)?;
            let after = &rest[close + 1..];
            let port = match after.strip_prefix(':') {
                Some(port_str) => parse_port(port_str).map_err(AuthorityError::Port)?,
                None if after.is_empty() => None,
                None => {
                    return Err(AuthorityError::TrailingAfterIpLiteral {
                        char: after.chars().next().unwrap_or('\u{fffd}'),
                        position: input.len() - rest.len() + close + 1,
                    });
                }
            };
            (host, port)
        } else if let Some(colon) = rest.rfind(':') {
            let port = parse_port(&rest[colon + 1..]).map_err(AuthorityError::Port)?;
            let host = Host::parse_unbracketed(&rest[..colon]).map_err(AuthorityError::Host)?;
            (host, port)
        } else {
            let host = Host::parse_unbracketed(rest).map_err(AuthorityError::Host)?;
            (host, None)
        };

        Ok(Self { userinfo, host, port })
    }

    pub(crate) fn from_parts(userinfo: Option<String>, host: Host, port: Option<u16>) -> Self {
        Self { userinfo, host, port }
    }

    /// Returns the userinfo subcomponent, if present.
    #[must_use]
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port, if present.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the user part of the userinfo: everything before its first
    /// `:`, or the whole userinfo if it has none.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.userinfo
            .as_deref()
            .map(|u| u.find(':').map_or(u, |i| &u[..i]))
    }

    /// Returns the password part of the userinfo: everything after its
    /// first `:`, if any.
    ///
    /// The `user:password` form is deprecated by RFC 3986 §3.2.1 but still
    /// widespread; this view exists for callers that must consume it.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.userinfo
            .as_deref()
            .and_then(|u| u.find(':').map(|i| &u[i + 1..]))
    }

    /// Returns the canonical form of this authority, dropping the port when
    /// it equals the scheme's default.
    pub(crate) fn normalized(&self, default_port: Option<u16>) -> Self {
        let port = match (self.port, default_port) {
            (Some(p), Some(d)) if p == d => None,
            (port, _) => port,
        };
        Self {
            userinfo: self
                .userinfo
                .as_deref()
                .map(|u| encoding::normalize_pct(u, false)),
            host: self.host.normalized(),
            port,
        }
    }
}

/// Parses a port span. Empty means "no port"; digits must fit `[0, 65535]`.
fn parse_port(input: &str) -> Result<Option<u16>, PortError> {
    if input.is_empty() {
        return Ok(None);
    }
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PortError::NonNumeric {
            value: input.to_string(),
        });
    }
    let digits = input.trim_start_matches('0');
    if digits.len() > 5 {
        return Err(PortError::OutOfRange {
            value: input.to_string(),
        });
    }
    let value: u32 = digits.parse().unwrap_or(0);
    u16::try_from(value)
        .map(Some)
        .map_err(|_| PortError::OutOfRange {
            value: input.to_string(),
        })
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = &self.userinfo {
            write!(f, "{userinfo}@")?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

impl FromStr for Authority {
    type Err = AuthorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Authority {
    type Error = AuthorityError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_host_only() {
        let auth = Authority::parse("example.com").unwrap();
        assert!(auth.userinfo().is_none());
        assert!(auth.port().is_none());
        assert!(matches!(auth.host(), Host::RegisteredName(_)));
    }

    #[test]
    fn parse_empty_host() {
        let auth = Authority::parse("").unwrap();
        assert_eq!(auth.host(), &Host::RegisteredName(String::new()));
    }

    #[test]
    fn parse_with_port() {
        let auth = Authority::parse("example.com:8080").unwrap();
        assert_eq!(auth.port(), Some(8080));
    }

    #[test]
    fn parse_with_userinfo() {
        let auth = Authority::parse("alice@example.com").unwrap();
        assert_eq!(auth.userinfo(), Some("alice"));
    }

    #[test]
    fn parse_userinfo_with_colon() {
        let auth = Authority::parse("alice:secret@example.com").unwrap();
        assert_eq!(auth.userinfo(), Some("alice:secret"));
        assert_eq!(auth.user(), Some("alice"));
        assert_eq!(auth.password(), Some("secret"));
    }

    #[test]
    fn user_without_password() {
        let auth = Authority::parse("alice@example.com").unwrap();
        assert_eq!(auth.user(), Some("alice"));
        assert_eq!(auth.password(), None);
    }

    #[test]
    fn parse_ipv6_with_port() {
        let auth = Authority::parse("[::1]:8080").unwrap();
        assert!(matches!(auth.host(), Host::Ipv6 { .. }));
        assert_eq!(auth.port(), Some(8080));
    }

    #[test]
    fn parse_ipv6_colons_do_not_read_as_port() {
        let auth = Authority::parse("[2001:db8::1]").unwrap();
        assert!(auth.port().is_none());
    }

    #[test]
    fn parse_userinfo_before_ip_literal() {
        let auth = Authority::parse("u@[::1]:80").unwrap();
        assert_eq!(auth.userinfo(), Some("u"));
        assert_eq!(auth.port(), Some(80));
    }

    #[test]
    fn parse_empty_port_span_means_no_port() {
        let auth = Authority::parse("example.com:").unwrap();
        assert!(auth.port().is_none());
        let auth = Authority::parse("[::1]:").unwrap();
        assert!(auth.port().is_none());
    }

    #[test]
    fn parse_port_with_leading_zeros() {
        let auth = Authority::parse("example.com:0080").unwrap();
        assert_eq!(auth.port(), Some(80));
    }

    #[test]
    fn parse_port_out_of_range_fails() {
        assert!(matches!(
            Authority::parse("example.com:70000"),
            Err(AuthorityError::Port(PortError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn parse_port_non_numeric_fails() {
        assert!(matches!(
            Authority::parse("example.com:8a"),
            Err(AuthorityError::Port(PortError::NonNumeric { .. }))
        ));
    }

    #[test]
    fn multiple_colons_make_host_invalid() {
        // "a:b:80": the port separator is the last ':', leaving "a:b" as a
        // registered name, which cannot contain ':'.
        assert!(matches!(
            Authority::parse("a:b:80"),
            Err(AuthorityError::Host(HostError::RegisteredName { char: ':', .. }))
        ));
    }

    #[test]
    fn parse_bad_userinfo_char_fails() {
        assert!(matches!(
            Authority::parse("a b@example.com"),
            Err(AuthorityError::InvalidUserinfoChar { char: ' ', position: 1 })
        ));
    }

    #[test]
    fn parse_garbage_after_ip_literal_fails() {
        assert!(matches!(
            Authority::parse("[::1]x"),
            Err(AuthorityError::TrailingAfterIpLiteral { char: 'x', .. })
        ));
    }

    #[test]
    fn parse_unterminated_bracket_is_host_error() {
        assert!(matches!(
            Authority::parse("[::1"),
            Err(AuthorityError::Host(HostError::Ipv6 { .. }))
        ));
    }

    #[test]
    fn display_roundtrip() {
        for input in [
            "example.com",
            "alice@example.com:8080",
            "[::1]:443",
            "u:p@10.0.0.1",
        ] {
            let auth = Authority::parse(input).unwrap();
            assert_eq!(auth.to_string(), input);
        }
    }

    #[test]
    fn normalized_strips_default_port() {
        let auth = Authority::parse("Example.COM:80").unwrap();
        let normalized = auth.normalized(Some(80));
        assert!(normalized.port().is_none());
        assert_eq!(normalized.host(), &Host::RegisteredName("example.com".to_string()));
    }

    #[test]
    fn normalized_keeps_non_default_port() {
        let auth = Authority::parse("example.com:8080").unwrap();
        assert_eq!(auth.normalized(Some(80)).port(), Some(8080));
    }
}
