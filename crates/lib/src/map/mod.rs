//! Ordered maps with dot-path access.
//!
//! This module provides the main public interface of the crate. The
//! [`OrderedMap`] type is an insertion-ordered key/value container whose
//! values may themselves be maps, so arbitrarily deep structures can be built
//! and addressed with dot-separated paths.
//!
//! # Layers
//!
//! - **Key-level access**: `insert()`, `get_key()`, `remove_key()` act on a
//!   single key with no path interpretation.
//! - **Path access** ([`resolve`]): `exists()`, `get()`, `set()`, `unset()`
//!   walk nested maps segment by segment.
//! - **Flattening** ([`flatten`]): `deflate()` and `inflate()` convert between
//!   nested maps and single-level maps keyed by full paths.
//! - **Collection operations** ([`ops`]): mapping, filtering, sorting,
//!   chunking, sampling and the other sequence algorithms.
//!
//! # Usage
//!
//! ```
//! use nestmap::{KeyMode, OrderedMap};
//!
//! let mut map = OrderedMap::new();
//! map.set("a.b.c", 1);
//! map.set("a.c.a", 2);
//!
//! assert_eq!(map.get_as::<i64>("a.b.c"), Some(1));
//! assert!(map.exists("a.c"));
//!
//! let flat = map.deflate(KeyMode::Paths);
//! let keys: Vec<String> = flat.keys().map(ToString::to_string).collect();
//! assert_eq!(keys, vec!["a.b.c", "a.c.a"]);
//! assert_eq!(flat.inflate(), map);
//! ```

use std::fmt;

use indexmap::IndexMap;

// Submodules
pub mod errors;
pub mod flatten;
pub mod json;
pub mod key;
pub mod ops;
pub mod path;
pub mod resolve;
pub mod value;

// Convenience re-exports for core map types
pub use errors::CollectionError;
pub use flatten::KeyMode;
pub use key::Key;
pub use ops::{ChunkKeys, KeyCase};
pub use path::{Path, PathBuf, PathError};
pub use value::Value;

/// An insertion-ordered map from [`Key`]s to [`Value`]s.
///
/// Entries are unique by key. Inserting an existing key replaces its value
/// in place without moving the entry; only operations documented as
/// reordering (sorting, shuffling, reversing) change the order.
///
/// Operations that take `&self` return new maps and never alias the
/// receiver's storage. The in-place mutators are the ones taking `&mut self`:
/// `insert`, `set`, `unset`, `push`, `pop`, `shift` and friends.
///
/// Equality is order-sensitive: two maps are equal when they hold the same
/// entries in the same order.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap {
    entries: IndexMap<Key, Value>,
}

impl OrderedMap {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates a new empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Creates a list map, keying the values `0..len` in order.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (Key::from(index), value.into()))
            .collect()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a value under a literal key, returning the previous value.
    ///
    /// The key is not interpreted as a path: `insert("a.b", 1)` creates a
    /// top-level key named `a.b`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into().canonical(), value.into())
    }

    /// Gets a value by literal key
    pub fn get_key(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into().canonical())
    }

    /// Gets a mutable reference to a value by literal key
    pub fn get_key_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.entries.get_mut(&key.into().canonical())
    }

    /// Returns true if the literal key is present
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into().canonical())
    }

    /// Removes a literal key, preserving the order of the remaining entries
    pub fn remove_key(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.shift_remove(&key.into().canonical())
    }

    /// Returns the entry at a position in iteration order
    pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
        self.entries.get_index(index)
    }

    /// Returns an iterator over all key-value pairs in order
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// Returns a mutable iterator over all key-value pairs in order
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Key, Value> {
        self.entries.iter_mut()
    }

    /// Returns an iterator over all keys in order
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over all values in order
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Returns a mutable iterator over all values in order
    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, Key, Value> {
        self.entries.values_mut()
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The key [`push`](Self::push) would use: one past the largest index
    /// key present, or 0 if there is none.
    pub fn next_index(&self) -> u64 {
        self.entries
            .keys()
            .filter_map(Key::as_index)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    /// Returns true if the keys are exactly `0..len` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(position, key)| *key == position as u64)
    }
}

// Builder pattern methods
impl OrderedMap {
    /// Builder method to insert a value under a literal key and return self
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder method to insert a nested map
    pub fn with_map(self, key: impl Into<Key>, value: OrderedMap) -> Self {
        self.with(key, Value::Map(value))
    }
}

impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl fmt::Display for OrderedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for OrderedMap {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
