//! Host type for URI authorities.
//!
//! # Grammar Reference
//!
//! The host grammar is defined in `grammar.abnf`:
//!
//! ```abnf
//! host        = IP-literal / IPv4address / reg-name
//! IP-literal  = "[" ( IPv6address / IPv6addrz / IPvFuture ) "]"
//! IPvFuture   = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
//! reg-name    = *( unreserved / pct-encoded / sub-delims )
//! ```
//!
//! Zone ids (`IPv6addrz`) follow RFC 6874: the address is separated from the
//! zone by `%25`.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::encoding::{self, Violation};
use crate::error::HostError;

/// The host portion of a URI authority.
///
/// The set of host forms is closed by the grammar, so the type is a tagged
/// union with one case per form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// A registered name (e.g., `example.com`), percent-encoding preserved
    RegisteredName(String),
    /// A dotted-decimal IPv4 address
    Ipv4(Ipv4Addr),
    /// A bracketed IPv6 address with an optional RFC 6874 zone id
    Ipv6 {
        /// The address value
        addr: Ipv6Addr,
        /// Zone id as written (possibly percent-encoded), without the `%25`
        zone_id: Option<String>,
    },
    /// A bracketed `v<hex>.<value>` literal reserved for future IP versions
    IpvFuture {
        /// Hexadecimal version tag (without the leading `v`)
        version: String,
        /// The literal's value part
        value: String,
    },
}

impl Host {
    /// Parses a host from a string, bracketed or not.
    ///
    /// Bracketed input is parsed by the IP-literal grammar. Unbracketed
    /// input shaped like dotted-decimal (digits and at least one `.`) must
    /// be a valid IPv4 address; anything else is validated as a registered
    /// name.
    ///
    /// # Errors
    ///
    /// Returns `HostError` naming the host form that failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Host;
    ///
    /// assert!(matches!(Host::parse("example.com").unwrap(), Host::RegisteredName(_)));
    /// assert!(matches!(Host::parse("127.0.0.1").unwrap(), Host::Ipv4(_)));
    /// assert!(matches!(Host::parse("[::1]").unwrap(), Host::Ipv6 { .. }));
    /// assert!(Host::parse("127.0.0.256").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, HostError> {
        if let Some(rest) = input.strip_prefix('[') {
            let content = rest.strip_suffix(']').ok_or_else(|| HostError::Ipv6 {
                value: input.to_string(),
                reason: "missing closing bracket",
            })?;
            return Self::parse_ip_literal(content);
        }
        Self::parse_unbracketed(input)
    }

    /// Parses the content of a bracketed IP literal (between `[` and `]`).
    pub(crate) fn parse_ip_literal(content: &str) -> Result<Self, HostError> {
        if content.starts_with(['v', 'V']) {
            return Self::parse_ipv_future(content);
        }

        let (addr_str, zone_id) = match content.find('%') {
            Some(i) => {
                let zone = content[i..].strip_prefix("%25").ok_or_else(|| HostError::Ipv6 {
                    value: content.to_string(),
                    reason: "zone id must be introduced by '%25'",
                })?;
                if zone.is_empty() {
                    return Err(HostError::Ipv6 {
                        value: content.to_string(),
                        reason: "zone id cannot be empty",
                    });
                }
                match encoding::check(zone, encoding::ZONE_ID) {
                    Ok(()) => {}
                    Err(Violation::Codec(e)) => return Err(HostError::PercentEncoding(e)),
                    Err(Violation::Char { .. }) => {
                        return Err(HostError::Ipv6 {
                            value: content.to_string(),
                            reason: "invalid character in zone id",
                        });
                    }
                }
                (&content[..i], Some(zone.to_string()))
            }
            None => (content, None),
        };

        let addr = addr_str.parse::<Ipv6Addr>().map_err(|_| HostError::Ipv6 {
            value: addr_str.to_string(),
            reason: "not a valid IPv6 address",
        })?;
        Ok(Self::Ipv6 { addr, zone_id })
    }

    /// Parses an unbracketed host: dotted-decimal IPv4 or registered name.
    pub(crate) fn parse_unbracketed(input: &str) -> Result<Self, HostError> {
        if is_dotted_decimal(input) {
            return parse_ipv4(input).map(Self::Ipv4);
        }
        match encoding::check(input, encoding::REG_NAME) {
            Ok(()) => Ok(Self::RegisteredName(input.to_string())),
            Err(Violation::Codec(e)) => Err(HostError::PercentEncoding(e)),
            Err(Violation::Char { char, position }) => {
                Err(HostError::RegisteredName { char, position })
            }
        }
    }

    /// Returns true if this host is a loopback address or the name
    /// `localhost`.
    #[must_use]
    pub fn is_loopback(&self) -> bool {
        match self {
            Self::RegisteredName(name) => name.eq_ignore_ascii_case("localhost"),
            Self::Ipv4(addr) => addr.is_loopback(),
            Self::Ipv6 { addr, .. } => addr.is_loopback(),
            Self::IpvFuture { .. } => false,
        }
    }

    /// Returns the canonical form of this host.
    ///
    /// Registered names get percent-normalized and lowercased; a name that
    /// then reads as dotted-decimal is reclassified as IPv4. IPvFuture
    /// literals are lowercased. IP addresses are already canonical.
    pub(crate) fn normalized(&self) -> Self {
        match self {
            Self::RegisteredName(name) => {
                let name = encoding::normalize_pct(name, true);
                match parse_ipv4(&name) {
                    Ok(addr) => Self::Ipv4(addr),
                    Err(_) => Self::RegisteredName(name),
                }
            }
            Self::Ipv4(addr) => Self::Ipv4(*addr),
            Self::Ipv6 { addr, zone_id } => Self::Ipv6 {
                addr: *addr,
                zone_id: zone_id.as_deref().map(|z| encoding::normalize_pct(z, false)),
            },
            Self::IpvFuture { version, value } => Self::IpvFuture {
                version: version.to_ascii_lowercase(),
                value: value.to_ascii_lowercase(),
            },
        }
    }

    fn parse_ipv_future(content: &str) -> Result<Self, HostError> {
        let rest = &content[1..];
        let dot = rest.find('.').ok_or_else(|| HostError::IpvFuture {
            value: content.to_string(),
            reason: "missing '.' after version tag",
        })?;
        let version = &rest[..dot];
        if version.is_empty() || !version.bytes().all(|b| encoding::HEXDIG.allows(b)) {
            return Err(HostError::IpvFuture {
                value: content.to_string(),
                reason: "version tag must be one or more hex digits",
            });
        }
        let value = &rest[dot + 1..];
        if value.is_empty() {
            return Err(HostError::IpvFuture {
                value: content.to_string(),
                reason: "value part cannot be empty",
            });
        }
        if encoding::check(value, encoding::IPV_FUTURE).is_err() {
            return Err(HostError::IpvFuture {
                value: content.to_string(),
                reason: "invalid character in value part",
            });
        }
        Ok(Self::IpvFuture {
            version: version.to_string(),
            value: value.to_string(),
        })
    }
}

/// True if the span is shaped like a dotted-decimal IPv4 address: only
/// digits and dots, with at least one dot. Such spans are committed to the
/// IPv4 grammar and never fall back to registered names.
fn is_dotted_decimal(input: &str) -> bool {
    !input.is_empty()
        && input.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && input.contains('.')
}

/// Strict dotted-decimal parser: four octets, each 0-255, no empty
/// component, no leading zero beyond a single `0`.
fn parse_ipv4(input: &str) -> Result<Ipv4Addr, HostError> {
    let err = |reason| HostError::Ipv4 {
        value: input.to_string(),
        reason,
    };

    let mut octets = [0u8; 4];
    let mut count = 0;
    for part in input.split('.') {
        if count == 4 {
            return Err(err("expected exactly four octets"));
        }
        if part.is_empty() {
            return Err(err("empty octet"));
        }
        if part.len() > 1 && part.starts_with('0') {
            return Err(err("octet has a leading zero"));
        }
        if part.len() > 3 {
            return Err(err("octet out of range"));
        }
        let value: u16 = part.parse().map_err(|_| err("octet is not a number"))?;
        octets[count] = u8::try_from(value).map_err(|_| err("octet out of range"))?;
        count += 1;
    }
    if count != 4 {
        return Err(err("expected exactly four octets"));
    }
    Ok(Ipv4Addr::from(octets))
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegisteredName(name) => write!(f, "{name}"),
            Self::Ipv4(addr) => write!(f, "{addr}"),
            Self::Ipv6 { addr, zone_id } => match zone_id {
                Some(zone) => write!(f, "[{addr}%25{zone}]"),
                None => write!(f, "[{addr}]"),
            },
            Self::IpvFuture { version, value } => write!(f, "[v{version}.{value}]"),
        }
    }
}

impl FromStr for Host {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Host {
    type Error = HostError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Host {
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
    fn parse_registered_name() {
        let host = Host::parse("example.com").unwrap();
        assert_eq!(host, Host::RegisteredName("example.com".to_string()));
    }

    #[test]
    fn parse_empty_registered_name() {
        // "file:///etc" has an empty but legal host
        let host = Host::parse("").unwrap();
        assert_eq!(host, Host::RegisteredName(String::new()));
    }

    #[test]
    fn parse_registered_name_with_pct() {
        let host = Host::parse("ex%41mple.com").unwrap();
        assert!(matches!(host, Host::RegisteredName(_)));
    }

    #[test]
    fn parse_registered_name_bad_char_fails() {
        assert!(matches!(
            Host::parse("exa mple"),
            Err(HostError::RegisteredName { char: ' ', position: 3 })
        ));
    }

    #[test]
    fn parse_registered_name_bad_pct_fails() {
        assert!(matches!(
            Host::parse("ex%zzmple"),
            Err(HostError::PercentEncoding(_))
        ));
    }

    #[test]
    fn parse_ipv4_address() {
        let host = Host::parse("192.168.1.1").unwrap();
        assert_eq!(host, Host::Ipv4(Ipv4Addr::new(192, 168, 1, 1)));
    }

    #[test]
    fn parse_ipv4_octet_out_of_range_fails() {
        assert!(matches!(
            Host::parse("192.168.1.256"),
            Err(HostError::Ipv4 { .. })
        ));
    }

    #[test]
    fn parse_ipv4_leading_zero_fails() {
        assert!(matches!(
            Host::parse("192.168.01.1"),
            Err(HostError::Ipv4 { .. })
        ));
    }

    #[test]
    fn parse_ipv4_wrong_octet_count_fails() {
        assert!(matches!(Host::parse("1.2.3"), Err(HostError::Ipv4 { .. })));
        assert!(matches!(Host::parse("1.2.3.4.5"), Err(HostError::Ipv4 { .. })));
        assert!(matches!(Host::parse("1..2.3"), Err(HostError::Ipv4 { .. })));
    }

    #[test]
    fn all_digit_name_without_dot_is_registered_name() {
        let host = Host::parse("12345").unwrap();
        assert!(matches!(host, Host::RegisteredName(_)));
    }

    #[test]
    fn parse_ipv6_literal() {
        let host = Host::parse("[::1]").unwrap();
        assert_eq!(
            host,
            Host::Ipv6 { addr: Ipv6Addr::LOCALHOST, zone_id: None }
        );
    }

    #[test]
    fn parse_ipv6_full_form() {
        assert!(Host::parse("[2001:db8:0:0:0:0:0:1]").is_ok());
    }

    #[test]
    fn parse_ipv6_embedded_ipv4() {
        assert!(Host::parse("[::ffff:192.0.2.1]").is_ok());
    }

    #[test]
    fn parse_ipv6_with_zone() {
        let host = Host::parse("[fe80::1%25eth0]").unwrap();
        assert!(matches!(host, Host::Ipv6 { zone_id: Some(ref z), .. } if z == "eth0"));
    }

    #[test]
    fn parse_ipv6_bare_percent_zone_fails() {
        assert!(matches!(
            Host::parse("[fe80::1%eth0]"),
            Err(HostError::Ipv6 { .. })
        ));
    }

    #[test]
    fn parse_ipv6_empty_zone_fails() {
        assert!(matches!(
            Host::parse("[fe80::1%25]"),
            Err(HostError::Ipv6 { .. })
        ));
    }

    #[test]
    fn parse_ipv6_unterminated_fails() {
        assert!(matches!(
            Host::parse("[::1"),
            Err(HostError::Ipv6 { reason: "missing closing bracket", .. })
        ));
    }

    #[test]
    fn parse_ipv6_garbage_fails() {
        assert!(matches!(Host::parse("[:::1]"), Err(HostError::Ipv6 { .. })));
        assert!(matches!(Host::parse("[1:2]"), Err(HostError::Ipv6 { .. })));
    }

    #[test]
    fn parse_ipv_future() {
        let host = Host::parse("[v1.fe:d]").unwrap();
        assert_eq!(
            host,
            Host::IpvFuture { version: "1".to_string(), value: "fe:d".to_string() }
        );
    }

    #[test]
    fn parse_ipv_future_missing_dot_fails() {
        assert!(matches!(
            Host::parse("[v1fed]"),
            Err(HostError::IpvFuture { .. })
        ));
    }

    #[test]
    fn parse_ipv_future_empty_value_fails() {
        assert!(matches!(
            Host::parse("[v1.]"),
            Err(HostError::IpvFuture { .. })
        ));
    }

    #[test]
    fn parse_ipv_future_bad_version_fails() {
        assert!(matches!(
            Host::parse("[vz.abc]"),
            Err(HostError::IpvFuture { .. })
        ));
    }

    #[test]
    fn display_roundtrip() {
        for input in ["example.com", "10.0.0.1", "[::1]", "[fe80::1%25eth0]", "[v1.abc]"] {
            let host = Host::parse(input).unwrap();
            assert_eq!(host.to_string(), input);
        }
    }

    #[test]
    fn normalized_lowercases_registered_name() {
        let host = Host::parse("EXAMPLE.COM").unwrap();
        assert_eq!(
            host.normalized(),
            Host::RegisteredName("example.com".to_string())
        );
    }

    #[test]
    fn normalized_decodes_unreserved_pct() {
        let host = Host::parse("ex%61mple.com").unwrap();
        assert_eq!(
            host.normalized(),
            Host::RegisteredName("example.com".to_string())
        );
    }

    #[test]
    fn normalized_reclassifies_decoded_ipv4() {
        let host = Host::parse("%31%32%37.0.0.1").unwrap();
        assert!(matches!(host, Host::RegisteredName(_)));
        assert_eq!(host.normalized(), Host::Ipv4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn normalized_lowercases_ipv_future() {
        let host = Host::parse("[V1A.ABC]").unwrap();
        assert_eq!(
            host.normalized(),
            Host::IpvFuture { version: "1a".to_string(), value: "abc".to_string() }
        );
    }

    #[test]
    fn is_loopback() {
        assert!(Host::parse("localhost").unwrap().is_loopback());
        assert!(Host::parse("127.0.0.1").unwrap().is_loopback());
        assert!(Host::parse("[::1]").unwrap().is_loopback());
        assert!(!Host::parse("example.com").unwrap().is_loopback());
    }
}
