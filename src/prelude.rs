//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for all common types:
//!
//! ```rust
//! use strict_uri::prelude::*;
//!
//! let uri = Uri::parse("http://example.com/a?k=v").unwrap();
//! assert!(uri.is_absolute());
//! ```
//!
//! The `encoding` module's character-set constants are intentionally
//! excluded; reach them as `encoding::UNRESERVED` and friends.

pub use crate::{
    // Core types
    Authority, Fragment, Host, Path, Query, Scheme, Uri,
    // Builder
    UriBuilder,
    // Codec
    percent_decode, percent_encode,
    // Errors
    AuthorityError, CodecError, FragmentError, HostError, ParseError, ParseErrorKind, PathError,
    PortError, QueryError, ResolveError, SchemeError,
};
