//! Parser, validator, normalizer, and resolver for URIs per RFC 3986.
//!
//! This crate implements parsing, validation, normalization, comparison,
//! and relative-reference resolution of URIs as defined in RFC 3986.
//!
//! # Overview
//!
//! A URI decomposes into five components:
//!
//! ```text
//! scheme://userinfo@host:port/path?query#fragment
//! ```
//!
//! Parsing is strict: each component is validated against the grammar and
//! the first invalid component aborts the parse with a specific error kind.
//! Invalid input is rejected, never repaired.
//!
//! # Quick Start
//!
//! ```rust
//! use strict_uri::Uri;
//!
//! // Parse a URI
//! let uri = Uri::parse("https://example.com:8443/a/b?k=v#top").unwrap();
//!
//! // Access components
//! assert_eq!(uri.scheme().unwrap().as_str(), "https");
//! assert_eq!(uri.port(), Some(8443));
//! assert_eq!(uri.path().to_string(), "/a/b");
//!
//! // Canonicalize
//! let uri = Uri::parse("HTTP://Example.COM:80/a/../b").unwrap();
//! assert_eq!(uri.normalize().to_string(), "http://example.com/b");
//!
//! // Resolve a relative reference
//! let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
//! let reference = Uri::parse("../g").unwrap();
//! assert_eq!(base.resolve(&reference).unwrap().to_string(), "http://a/b/g");
//! ```
//!
//! # Builder
//!
//! ```rust
//! use strict_uri::UriBuilder;
//!
//! let uri = UriBuilder::new()
//!     .try_scheme("https").unwrap()
//!     .try_host("example.com").unwrap()
//!     .try_path("/docs").unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(uri.to_string(), "https://example.com/docs");
//! ```
//!
//! # Concurrency
//!
//! Every operation is pure and synchronous: no I/O, no shared mutable
//! state. `Uri` values are immutable after construction, so they may be
//! used freely across threads. The only process-wide state is the
//! read-only scheme-to-default-port table.
//!
//! # Grammar Specification
//!
//! This crate implements the ABNF grammar collected in `grammar.abnf` at
//! the crate root, following RFC 5234 (ABNF) and RFC 3986 Appendix A, with
//! the RFC 6874 zone-id extension for IPv6 literals.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod authority;
mod builder;
pub mod encoding;
mod error;
mod fragment;
mod host;
#[cfg(kani)]
mod kani_impls;
mod path;
pub mod prelude;
mod query;
mod resolve;
mod scheme;
mod uri;

pub use authority::Authority;
pub use builder::UriBuilder;
pub use encoding::{percent_decode, percent_encode, CharSet};
pub use error::{
    AuthorityError, CodecError, FragmentError, HostError, ParseError, ParseErrorKind, PathError,
    PortError, QueryError, ResolveError, SchemeError,
};
pub use fragment::Fragment;
pub use host::Host;
pub use path::Path;
pub use query::Query;
pub use scheme::Scheme;
pub use uri::Uri;
