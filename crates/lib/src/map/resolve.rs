//! Path resolution on ordered maps.
//!
//! Every operation here treats a single-segment path and a multi-segment path
//! through the same walk: the first segment is looked up in the current map,
//! and if more segments remain the walk continues inside the nested map found
//! there. A key that literally contains a `.` is therefore unreachable through
//! a path.
//!
//! Every string is a path, and empty segments are ordinary keys. Reads are
//! total: a missing key, or a scalar where a nested map is needed, resolves
//! to `false`/`None`. Writes create intermediate maps as they go, replacing
//! any scalar in the way.

use tracing::trace;

use super::{CollectionError, Key, OrderedMap, Path, Value};

impl OrderedMap {
    /// Returns true if the path resolves to a present key.
    ///
    /// A key holding [`Value::Null`] exists. Paths that run into a scalar
    /// before their last segment do not. Never mutates.
    ///
    /// ```
    /// # use nestmap::OrderedMap;
    /// let mut map = OrderedMap::new().with("a", 1);
    /// map.set("c.b", nestmap::Value::Null);
    ///
    /// assert!(map.exists("a"));
    /// assert!(map.exists("c.b"));
    /// assert!(!map.exists("a.a"));
    /// assert!(!map.exists("c.z"));
    /// ```
    pub fn exists(&self, path: impl AsRef<str>) -> bool {
        self.get(path).is_some()
    }

    /// Gets the value a path resolves to.
    pub fn get(&self, path: impl AsRef<str>) -> Option<&Value> {
        let path = Path::new(path.as_ref());
        let (parent, last) = path.split_last();

        let mut current = self;
        if let Some(parent) = parent {
            for segment in parent.segments() {
                current = match current.entries.get(&Key::from(segment)) {
                    Some(Value::Map(map)) => map,
                    _ => {
                        trace!(path = %path, segment, "path does not resolve");
                        return None;
                    }
                };
            }
        }

        current.entries.get(&Key::from(last))
    }

    /// Gets the value a path resolves to, or `default` if it does not resolve.
    pub fn get_or<'a>(&'a self, path: impl AsRef<str>, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// Gets a value by path with automatic type conversion using TryFrom
    ///
    /// Returns None if the path doesn't resolve or the conversion fails.
    ///
    /// ```
    /// # use nestmap::OrderedMap;
    /// let mut map = OrderedMap::new();
    /// map.set("user.name", "Alice");
    /// map.set("user.age", 30);
    ///
    /// assert_eq!(map.get_as::<&str>("user.name"), Some("Alice"));
    /// assert_eq!(map.get_as::<i64>("user.age"), Some(30));
    /// assert_eq!(map.get_as::<i64>("user.name"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, path: impl AsRef<str>) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = CollectionError>,
    {
        let value = self.get(path)?;
        T::try_from(value).ok()
    }

    /// Gets a mutable reference to the value a path resolves to.
    ///
    /// Unlike [`set`](Self::set), this never creates intermediate maps.
    pub fn get_mut(&mut self, path: impl AsRef<str>) -> Option<&mut Value> {
        let path = Path::new(path.as_ref());
        let (parent, last) = path.split_last();

        let mut current = self;
        if let Some(parent) = parent {
            for segment in parent.segments() {
                current = match current.entries.get_mut(&Key::from(segment)) {
                    Some(Value::Map(map)) => map,
                    _ => return None,
                };
            }
        }

        current.entries.get_mut(&Key::from(last))
    }

    /// Sets a value at a path, creating intermediate maps as needed.
    ///
    /// A single-segment path assigns the key directly. For a longer path,
    /// any segment before the last that does not hold a map gets a new empty
    /// map, and whatever was stored there before is discarded. Repeated
    /// assignments can build deep structures from nothing:
    ///
    /// ```
    /// # use nestmap::OrderedMap;
    /// let mut map = OrderedMap::new();
    /// map.set("a", "scalar");
    /// map.set("a.b", 1);
    ///
    /// assert!(map.get("a").is_some_and(|a| a.is_map()));
    /// assert_eq!(map.get_as::<i64>("a.b"), Some(1));
    /// ```
    ///
    /// Returns the value previously stored at the final segment, if any.
    pub fn set(&mut self, path: impl AsRef<str>, value: impl Into<Value>) -> Option<Value> {
        self.set_path(Path::new(path.as_ref()), value.into())
    }

    pub(crate) fn set_path(&mut self, path: &Path, value: Value) -> Option<Value> {
        let (parent, last) = path.split_last();

        let mut current = self;
        if let Some(parent) = parent {
            for segment in parent.segments() {
                let slot = current
                    .entries
                    .entry(Key::from(segment))
                    .or_insert_with(|| Value::Map(OrderedMap::new()));
                current = vivify(slot, path, segment);
            }
        }

        current.entries.insert(Key::from(last), value)
    }

    /// Removes the value at a path, returning it if it was present.
    ///
    /// Removing a missing path is a no-op. Maps that become empty along the
    /// way are left in place.
    pub fn unset(&mut self, path: impl AsRef<str>) -> Option<Value> {
        let (parent, last) = Path::new(path.as_ref()).split_last();

        let container = match parent {
            Some(parent) => match self.get_mut(parent) {
                Some(Value::Map(map)) => map,
                _ => return None,
            },
            None => self,
        };

        container.entries.shift_remove(&Key::from(last))
    }
}

/// Makes sure a slot on a write path holds a map, replacing anything else.
fn vivify<'a>(slot: &'a mut Value, path: &Path, segment: &str) -> &'a mut OrderedMap {
    if !slot.is_map() {
        trace!(
            path = %path,
            segment,
            replaced = slot.type_name(),
            "replacing scalar with map on write path"
        );
        *slot = Value::Map(OrderedMap::new());
    }

    match slot {
        Value::Map(map) => map,
        _ => unreachable!("slot was just replaced with a map"),
    }
}
