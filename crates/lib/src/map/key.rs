//! Keys for ordered maps.
//!
//! A key is either a non-negative integer index or a name. Text that spells a
//! canonical decimal integer is always stored as an index, so `"3"` and `3`
//! address the same entry while `"03"` stays a name.

use std::fmt;

/// A key in an [`OrderedMap`](super::OrderedMap).
///
/// # Canonical form
///
/// A string converts to [`Key::Index`] if and only if it matches
/// `^(0|[1-9][0-9]*)$` and fits in a `u64`. Everything else, including
/// `"08"`, `"-1"`, `"1.5"` and the empty string, is a [`Key::Name`].
///
/// ```
/// # use nestmap::Key;
/// assert_eq!(Key::from("42"), Key::Index(42));
/// assert_eq!(Key::from("042"), Key::Name("042".to_string()));
/// assert_eq!(Key::from("-1"), Key::Name("-1".to_string()));
/// ```
///
/// # Ordering
///
/// Every index sorts before every name. Indices compare numerically and
/// names compare byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer position-like key
    Index(u64),
    /// String key
    Name(String),
}

impl Key {
    /// Parses `s` as a canonical index, if it is one.
    pub fn parse_index(s: &str) -> Option<u64> {
        let bytes = s.as_bytes();
        match bytes {
            [] => None,
            [b'0'] => Some(0),
            [b'0', ..] => None,
            _ if bytes.iter().all(u8::is_ascii_digit) => s.parse().ok(),
            _ => None,
        }
    }

    /// Returns the canonical form of this key.
    ///
    /// A `Key::Name` built directly from a canonical integer string is
    /// turned into the matching `Key::Index`. Maps call this on every
    /// insertion.
    pub fn canonical(self) -> Self {
        match self {
            Key::Name(name) => match Self::parse_index(&name) {
                Some(index) => Key::Index(index),
                None => Key::Name(name),
            },
            index => index,
        }
    }

    /// Returns true if this is an integer key
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Returns true if this is a string key
    pub fn is_name(&self) -> bool {
        matches!(self, Key::Name(_))
    }

    /// Attempts to get the integer index
    pub fn as_index(&self) -> Option<u64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    /// Attempts to get the key name
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<u64> for Key {
    fn from(value: u64) -> Self {
        Key::Index(value)
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Index(value as u64)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(value as u64)
    }
}

// Negative integers have no index form; they become names like their text.
impl From<i64> for Key {
    fn from(value: i64) -> Self {
        match u64::try_from(value) {
            Ok(index) => Key::Index(index),
            Err(_) => Key::Name(value.to_string()),
        }
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::from(value as i64)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value).canonical()
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        match Self::parse_index(value) {
            Some(index) => Key::Index(index),
            None => Key::Name(value.to_string()),
        }
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::from(value.as_str())
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        *self == Key::from(other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<u64> for Key {
    fn eq(&self, other: &u64) -> bool {
        matches!(self, Key::Index(index) if index == other)
    }
}

impl PartialEq<Key> for &str {
    fn eq(&self, other: &Key) -> bool {
        other == self
    }
}

impl PartialEq<Key> for u64 {
    fn eq(&self, other: &Key) -> bool {
        other == self
    }
}
