//! Error types for URI parsing, decoding, and resolution.

use std::fmt;

/// Errors that can occur when parsing or building a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
///
/// The first component that fails validation aborts the whole parse; no
/// partially valid URI value is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input is empty where a URI or reference is required
    Empty,
    /// Scheme span fails its grammar
    InvalidScheme(SchemeError),
    /// Malformed `userinfo@host:port` structure
    InvalidAuthority(AuthorityError),
    /// Host span fails its specific grammar
    InvalidHost(HostError),
    /// Port is non-numeric or out of range
    InvalidPort(PortError),
    /// Malformed `%XY` triplet anywhere a percent-encoded value is checked
    InvalidPercentEncoding(CodecError),
    /// Disallowed character in the path outside any valid percent-encoding
    InvalidPath(PathError),
    /// Disallowed character in the query outside any valid percent-encoding
    InvalidQuery(QueryError),
    /// Disallowed character in the fragment outside any valid percent-encoding
    InvalidFragment(FragmentError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::Empty => write!(f, "input is empty"),
            ParseErrorKind::InvalidScheme(e) => write!(f, "invalid scheme: {e}"),
            ParseErrorKind::InvalidAuthority(e) => write!(f, "invalid authority: {e}"),
            ParseErrorKind::InvalidHost(e) => write!(f, "invalid host: {e}"),
            ParseErrorKind::InvalidPort(e) => write!(f, "invalid port: {e}"),
            ParseErrorKind::InvalidPercentEncoding(e) => write!(f, "{e}"),
            ParseErrorKind::InvalidPath(e) => write!(f, "invalid path: {e}"),
            ParseErrorKind::InvalidQuery(e) => write!(f, "invalid query: {e}"),
            ParseErrorKind::InvalidFragment(e) => write!(f, "invalid fragment: {e}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Error for malformed percent-encoding triplets.
///
/// Raised when a `%` is not followed by two hexadecimal digits, including a
/// truncated `%` or `%X` at the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecError {
    /// Byte offset of the offending `%`
    pub position: usize,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed percent-encoding triplet at byte {}",
            self.position
        )
    }
}

impl std::error::Error for CodecError {}

/// Errors for scheme parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    /// Scheme is empty
    Empty,
    /// Scheme must start with an ASCII letter
    MustStartWithLetter {
        /// The character found
        found: char,
    },
    /// Invalid character (not a letter, digit, `+`, `-`, or `.`)
    InvalidChar {
        /// The invalid character
        char: char,
        /// Byte offset in the input
        position: usize,
    },
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "scheme cannot be empty"),
            Self::MustStartWithLetter { found } => {
                write!(f, "scheme must start with a letter, found '{found}'")
            }
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; only letters, digits, '+', '-', and '.' allowed"
                )
            }
        }
    }
}

impl std::error::Error for SchemeError {}

/// Errors for authority parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// Invalid character in the userinfo subcomponent
    InvalidUserinfoChar {
        /// The invalid character
        char: char,
        /// Byte offset in the authority
        position: usize,
    },
    /// Malformed percent-encoding in the userinfo
    PercentEncoding(CodecError),
    /// Unexpected character between an IP literal's `]` and the port
    TrailingAfterIpLiteral {
        /// The unexpected character
        char: char,
        /// Byte offset in the authority
        position: usize,
    },
    /// Host parsing failed
    Host(HostError),
    /// Port parsing failed
    Port(PortError),
    /// Userinfo was supplied without a host
    UserinfoWithoutHost,
    /// Port was supplied without a host
    PortWithoutHost,
}

impl fmt::Display for AuthorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUserinfoChar { char, position } => {
                write!(f, "invalid character '{char}' in userinfo at position {position}")
            }
            Self::PercentEncoding(e) => write!(f, "{e}"),
            Self::TrailingAfterIpLiteral { char, position } => {
                write!(
                    f,
                    "expected ':' or end after IP literal, found '{char}' at position {position}"
                )
            }
            Self::Host(e) => write!(f, "{e}"),
            Self::Port(e) => write!(f, "{e}"),
            Self::UserinfoWithoutHost => write!(f, "userinfo requires a host"),
            Self::PortWithoutHost => write!(f, "port requires a host"),
        }
    }
}

impl std::error::Error for AuthorityError {}

/// Errors for host parsing, one variant per host form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Dotted-decimal IPv4 address failed its grammar
    Ipv4 {
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Bracketed IPv6 literal failed its grammar
    Ipv6 {
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Bracketed `vX.` future-version literal failed its grammar
    IpvFuture {
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Invalid character in a registered name
    RegisteredName {
        /// The invalid character
        char: char,
        /// Byte offset in the host
        position: usize,
    },
    /// Malformed percent-encoding in a registered name or zone id
    PercentEncoding(CodecError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 { value, reason } => {
                write!(f, "invalid IPv4 address '{value}': {reason}")
            }
            Self::Ipv6 { value, reason } => {
                write!(f, "invalid IPv6 literal '{value}': {reason}")
            }
            Self::IpvFuture { value, reason } => {
                write!(f, "invalid IPvFuture literal '{value}': {reason}")
            }
            Self::RegisteredName { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' in registered name at position {position}"
                )
            }
            Self::PercentEncoding(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Errors for port parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    /// Port contains a non-digit character
    NonNumeric {
        /// The invalid value
        value: String,
    },
    /// Port is outside `[0, 65535]`
    OutOfRange {
        /// The invalid value
        value: String,
    },
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNumeric { value } => {
                write!(f, "port '{value}' must contain only digits")
            }
            Self::OutOfRange { value } => {
                write!(f, "port '{value}' must be 0-65535")
            }
        }
    }
}

impl std::error::Error for PortError {}

/// Errors for path parsing and the path invariants checked at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Invalid character outside any valid percent-encoding
    InvalidChar {
        /// The invalid character
        char: char,
        /// Byte offset in the path
        position: usize,
    },
    /// Malformed percent-encoding in a path segment
    PercentEncoding(CodecError),
    /// A URI with an authority requires an empty or absolute path
    RootlessWithAuthority,
    /// A path starting with `//` is ambiguous without an authority
    DoubleSlashWithoutAuthority,
    /// The first segment of a schemeless relative path cannot contain `:`
    ColonInFirstSegment,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(f, "invalid character '{char}' at position {position}")
            }
            Self::PercentEncoding(e) => write!(f, "{e}"),
            Self::RootlessWithAuthority => {
                write!(f, "path must be empty or start with '/' when an authority is present")
            }
            Self::DoubleSlashWithoutAuthority => {
                write!(f, "path cannot start with '//' without an authority")
            }
            Self::ColonInFirstSegment => {
                write!(
                    f,
                    "first segment of a relative path cannot contain ':' without a scheme"
                )
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Errors for query parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Invalid character outside any valid percent-encoding
    InvalidChar {
        /// The invalid character
        char: char,
        /// Byte offset in the query
        position: usize,
    },
    /// Malformed percent-encoding in the query
    PercentEncoding(CodecError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(f, "invalid character '{char}' at position {position}")
            }
            Self::PercentEncoding(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for QueryError {}

/// Errors for fragment parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// Invalid character outside any valid percent-encoding
    InvalidChar {
        /// The invalid character
        char: char,
        /// Byte offset in the fragment
        position: usize,
    },
    /// Malformed percent-encoding in the fragment
    PercentEncoding(CodecError),
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(f, "invalid character '{char}' at position {position}")
            }
            Self::PercentEncoding(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FragmentError {}

/// Errors that can occur when resolving a reference against a base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The base URI has no scheme; resolution requires an absolute base
    BaseNotAbsolute,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseNotAbsolute => {
                write!(f, "resolution requires an absolute base URI (missing scheme)")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

// Lifting into ParseErrorKind routes percent-encoding failures to the
// dedicated kind regardless of which component they were found in.

impl From<SchemeError> for ParseErrorKind {
    fn from(e: SchemeError) -> Self {
        Self::InvalidScheme(e)
    }
}

impl From<AuthorityError> for ParseErrorKind {
    fn from(e: AuthorityError) -> Self {
        match e {
            AuthorityError::PercentEncoding(c) => Self::InvalidPercentEncoding(c),
            AuthorityError::Host(e) => Self::from(e),
            AuthorityError::Port(e) => Self::InvalidPort(e),
            e => Self::InvalidAuthority(e),
        }
    }
}

impl From<HostError> for ParseErrorKind {
    fn from(e: HostError) -> Self {
        match e {
            HostError::PercentEncoding(c) => Self::InvalidPercentEncoding(c),
            e => Self::InvalidHost(e),
        }
    }
}

impl From<PortError> for ParseErrorKind {
    fn from(e: PortError) -> Self {
        Self::InvalidPort(e)
    }
}

impl From<PathError> for ParseErrorKind {
    fn from(e: PathError) -> Self {
        match e {
            PathError::PercentEncoding(c) => Self::InvalidPercentEncoding(c),
            e => Self::InvalidPath(e),
        }
    }
}

impl From<QueryError> for ParseErrorKind {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::PercentEncoding(c) => Self::InvalidPercentEncoding(c),
            e => Self::InvalidQuery(e),
        }
    }
}

impl From<FragmentError> for ParseErrorKind {
    fn from(e: FragmentError) -> Self {
        match e {
            FragmentError::PercentEncoding(c) => Self::InvalidPercentEncoding(c),
            e => Self::InvalidFragment(e),
        }
    }
}
