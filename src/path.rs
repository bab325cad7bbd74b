//! Path type and the dot-segment removal algorithm.

use std::fmt;
use std::str::FromStr;

use crate::encoding::{self, Violation};
use crate::error::PathError;

/// A validated URI path: an ordered sequence of segments plus an
/// absoluteness flag.
///
/// Segments keep their percent-encoding as written. Empty segments are
/// legal (`a//b` has three segments); a trailing slash is a trailing empty
/// segment. The empty path has no segments and is not absolute.
///
/// # Examples
///
/// ```
/// use strict_uri::Path;
///
/// let path = Path::parse("/a/b/../c").unwrap();
/// assert!(path.is_absolute());
/// assert_eq!(path.segments().len(), 4);
/// assert_eq!(path.remove_dot_segments().to_string(), "/a/c");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
    absolute: bool,
}

impl Path {
    /// Parses a path from a string.
    ///
    /// # Errors
    ///
    /// Returns `PathError` if any character is outside the path character
    /// set and not part of a valid percent-encoding triplet.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Ok(Self::default());
        }
        match encoding::check(input, encoding::PATH) {
            Ok(()) => {}
            Err(Violation::Codec(e)) => return Err(PathError::PercentEncoding(e)),
            Err(Violation::Char { char, position }) => {
                return Err(PathError::InvalidChar { char, position });
            }
        }
        let absolute = input.starts_with('/');
        let body = if absolute { &input[1..] } else { input };
        let segments = body.split('/').map(str::to_string).collect();
        Ok(Self { segments, absolute })
    }

    pub(crate) fn from_segments(segments: Vec<String>, absolute: bool) -> Self {
        Self { segments, absolute }
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns true if the path starts with `/`.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns true if the path is the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.absolute && self.segments.is_empty()
    }

    /// True when the path begins with `//`, which is ambiguous with the
    /// authority marker when no authority is present.
    pub(crate) fn starts_with_double_slash(&self) -> bool {
        self.absolute && self.segments.len() > 1 && self.segments[0].is_empty()
    }

    /// Removes `.` and `..` segments per RFC 3986 §5.2.4.
    ///
    /// Segments are processed left to right against an output list: `.` is
    /// dropped, `..` removes the previous output segment if there is one,
    /// anything else is appended. A `..` at the start of a relative path
    /// with nothing before it is dropped with no effect. A `.` or `..` in
    /// final position keeps the trailing slash (`/a/b/..` becomes `/a/`).
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Path;
    ///
    /// let removed = |s: &str| Path::parse(s).unwrap().remove_dot_segments().to_string();
    /// assert_eq!(removed("/a/b/../c"), "/a/c");
    /// assert_eq!(removed("/../a"), "/a");
    /// assert_eq!(removed("a/./b"), "a/b");
    /// ```
    #[must_use]
    pub fn remove_dot_segments(&self) -> Self {
        let mut out: Vec<String> = Vec::with_capacity(self.segments.len());
        let last_index = self.segments.len().wrapping_sub(1);
        for (i, segment) in self.segments.iter().enumerate() {
            let is_last = i == last_index;
            match segment.as_str() {
                "." => {
                    if is_last && (self.absolute || !out.is_empty()) {
                        out.push(String::new());
                    }
                }
                ".." => {
                    out.pop();
                    if is_last && (self.absolute || !out.is_empty()) {
                        out.push(String::new());
                    }
                }
                _ => out.push(segment.clone()),
            }
        }
        if self.absolute && out.is_empty() {
            out.push(String::new());
        }
        Self {
            segments: out,
            absolute: self.absolute,
        }
    }

    /// Merges a relative reference's path onto this base path per RFC 3986
    /// §5.3: everything after the base's last `/` is replaced, or the
    /// result is rooted at `/` when the base has an authority and an empty
    /// path.
    pub(crate) fn merged_with(&self, reference: &Self, base_has_authority: bool) -> Self {
        if base_has_authority && self.is_empty() {
            return Self {
                segments: reference.segments.clone(),
                absolute: true,
            };
        }
        let mut segments = self.segments.clone();
        segments.pop();
        segments.extend_from_slice(&reference.segments);
        Self {
            segments,
            absolute: self.absolute,
        }
    }

    /// Returns this path with every segment percent-normalized.
    pub(crate) fn normalized_pct(&self) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .map(|s| encoding::normalize_pct(s, false))
                .collect(),
            absolute: self.absolute,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "/")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
