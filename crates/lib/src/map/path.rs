//! Path types for dot-separated access into nested maps.
//!
//! The Path/PathBuf types follow the same borrowed/owned pattern as
//! std::path::Path/PathBuf.
//!
//! # Syntax
//!
//! - A path is split on every `.`. A path without a `.` is a single segment
//!   and names a top-level key directly, including the empty key `""`.
//! - Empty segments are ordinary keys: `"a."` addresses the key `""` inside
//!   `a`, and `"a..b"` walks `a`, then `""`, then `b`. Every string is a path.
//! - Each segment becomes a [`Key`] through the canonical conversion, so the
//!   segment `"3"` addresses index 3 while `"03"` addresses the name `"03"`.
//!
//! Because splitting happens on every `.`, a key whose text contains a dot can
//! never be addressed through a path. Use the key-level map API for those.
//!
//! # Usage
//!
//! ```rust
//! use nestmap::map::{Path, PathBuf};
//!
//! let path = Path::new("user.profile.name");
//! assert_eq!(path.len(), 3);
//! assert_eq!(Path::new("user.").len(), 2);
//!
//! let built = PathBuf::new().push("user")?.push(0)?.push("name")?;
//! assert_eq!(built.as_str(), "user.0.name");
//!
//! assert!(PathBuf::new().push("user.name").is_err());
//! # Ok::<(), nestmap::map::PathError>(())
//! ```

use std::{borrow::Borrow, convert::Infallible, fmt, ops::Deref, str::FromStr};

use thiserror::Error;

use super::Key;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Error type for building paths from keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// A segment appended to a path cannot be represented in path syntax.
    #[error("Invalid segment '{segment}': {reason}")]
    InvalidSegment { segment: String, reason: String },
}

/// A borrowed path.
///
/// `Path` is the borrowed counterpart to [`PathBuf`], similar to how `&str`
/// relates to `String`. This type is unsized and must always be used behind a
/// reference.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Path {
    inner: str,
}

impl Path {
    /// Borrows a string as a path.
    pub fn new(s: &str) -> &Path {
        // SAFETY: Path is repr(transparent) over str
        unsafe { &*(s as *const str as *const Path) }
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns an iterator over the segments as string slices.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split(SEPARATOR)
    }

    /// Returns an iterator over the segments converted to map keys.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.segments().map(Key::from)
    }

    /// Returns the number of segments.
    ///
    /// Always at least one: the empty path is the single empty segment.
    pub fn len(&self) -> usize {
        self.inner.split(SEPARATOR).count()
    }

    /// Returns `true` if the path addresses a top-level key directly.
    pub fn is_single(&self) -> bool {
        !self.inner.contains(SEPARATOR)
    }

    /// Splits off the first segment, returning it with the remaining path.
    pub fn split_first(&self) -> (&str, Option<&Path>) {
        match self.inner.split_once(SEPARATOR) {
            Some((first, rest)) => (first, Some(Path::new(rest))),
            None => (&self.inner, None),
        }
    }

    /// Splits off the last segment, returning the parent path and the segment.
    pub fn split_last(&self) -> (Option<&Path>, &str) {
        match self.inner.rsplit_once(SEPARATOR) {
            Some((parent, last)) => (Some(Path::new(parent)), last),
            None => (None, &self.inner),
        }
    }

    /// Converts this `Path` to an owned `PathBuf`.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf {
            inner: self.inner.to_string(),
            segments: self.len(),
        }
    }
}

/// An owned path.
///
/// Built either by parsing a string or by appending keys one at a time. A new
/// `PathBuf` has no segments yet; the first pushed key becomes its only
/// segment, even when that key is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathBuf {
    inner: String,
    segments: usize,
}

impl PathBuf {
    /// Creates a new path with no segments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key as a new trailing segment.
    ///
    /// Fails if the key's text contains a dot, because such a segment could
    /// not be parsed back out of the joined path.
    pub fn push(mut self, key: impl Into<Key>) -> Result<Self, PathError> {
        let segment = key.into().to_string();
        if segment.contains(SEPARATOR) {
            return Err(PathError::InvalidSegment {
                segment,
                reason: "segments cannot contain dots".to_string(),
            });
        }

        if self.segments > 0 {
            self.inner.push(SEPARATOR);
        }
        self.inner.push_str(&segment);
        self.segments += 1;
        Ok(self)
    }

    /// Builds a path from a sequence of keys.
    pub fn from_keys<I, K>(keys: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        keys.into_iter().try_fold(PathBuf::new(), PathBuf::push)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Consumes the path, returning the joined string.
    pub fn into_string(self) -> String {
        self.inner
    }
}

impl Deref for PathBuf {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        Path::new(&self.inner)
    }
}

impl AsRef<Path> for PathBuf {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for PathBuf {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Borrow<Path> for PathBuf {
    fn borrow(&self) -> &Path {
        self
    }
}

impl FromStr for PathBuf {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::new(s).to_path_buf())
    }
}

impl From<String> for PathBuf {
    fn from(inner: String) -> Self {
        let segments = Path::new(&inner).len();
        PathBuf { inner, segments }
    }
}

impl From<&str> for PathBuf {
    fn from(s: &str) -> Self {
        Path::new(s).to_path_buf()
    }
}

impl fmt::Display for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.inner)
    }
}
