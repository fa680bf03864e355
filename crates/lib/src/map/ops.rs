//! Collection operations on ordered maps.
//!
//! Sequence and functional algorithms layered on top of [`OrderedMap`]. All of
//! them preserve insertion order unless they are explicitly about reordering.
//! Methods taking `&self` return new maps. `push`, `pop` and `shift` mutate the
//! receiver.

use std::cmp::Ordering;

use rand::{Rng, seq::SliceRandom};
use tracing::warn;

use super::{CollectionError, Key, KeyMode, OrderedMap, Value};

/// How [`OrderedMap::chunk`] keys the entries inside each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkKeys {
    /// Keep each entry's original key.
    #[default]
    Preserve,
    /// Key each chunk's entries `0..len`.
    Renumber,
}

/// Target case for [`OrderedMap::change_key_case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    #[default]
    Lower,
    Upper,
}

// Construction
impl OrderedMap {
    /// Creates a list map of integers from `start` to `end` inclusive.
    ///
    /// Counts down when `start > end`. `step` is the distance between
    /// consecutive values and must not be zero.
    ///
    /// ```
    /// # use nestmap::OrderedMap;
    /// let evens = OrderedMap::range(0, 10, 2)?;
    /// assert_eq!(evens, OrderedMap::from_values([0, 2, 4, 6, 8, 10]));
    ///
    /// let countdown = OrderedMap::range(3, 1, 1)?;
    /// assert_eq!(countdown, OrderedMap::from_values([3, 2, 1]));
    /// # Ok::<(), nestmap::Error>(())
    /// ```
    pub fn range(start: i64, end: i64, step: u64) -> Result<OrderedMap, CollectionError> {
        if step == 0 {
            return Err(CollectionError::invalid_argument(
                "range",
                "step must be at least 1",
            ));
        }

        let step = i64::try_from(step).unwrap_or(i64::MAX);
        let mut values = Vec::new();
        let mut current = Some(start);
        while let Some(value) = current {
            if (start <= end && value > end) || (start > end && value < end) {
                break;
            }
            values.push(value);
            current = if start <= end {
                value.checked_add(step)
            } else {
                value.checked_sub(step)
            };
        }
        Ok(OrderedMap::from_values(values))
    }

    /// Creates a list map of single-character strings from `start` to `end`
    /// inclusive, counting down when `start > end`.
    pub fn char_range(start: char, end: char) -> OrderedMap {
        if start <= end {
            OrderedMap::from_values(start..=end)
        } else {
            OrderedMap::from_values((end..=start).rev())
        }
    }
}

// Mapping and filtering
impl OrderedMap {
    /// Applies `f(value, key)` to every entry, keeping keys and order.
    pub fn map<F>(&self, mut f: F) -> OrderedMap
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), f(value, key)))
            .collect()
    }

    /// Applies `f(value, path)` to every leaf of a nested map.
    ///
    /// The map is deflated first, so `f` sees full dot-paths as keys, and the
    /// result is inflated back into the original shape.
    ///
    /// ```
    /// # use nestmap::{OrderedMap, Value};
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b.a", 2);
    ///
    /// let labelled = map.map_nested(|value, key| Value::from(format!("{key}-{value}")));
    /// assert_eq!(labelled.get_as::<&str>("b.a"), Some("b.a-2"));
    /// ```
    pub fn map_nested<F>(&self, f: F) -> OrderedMap
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        self.deflate(KeyMode::Paths).map(f).inflate()
    }

    /// Keeps the entries for which `predicate(value, key)` holds.
    pub fn filter<F>(&self, mut predicate: F) -> OrderedMap
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter()
            .filter(|(key, value)| predicate(value, key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Drops falsy values; see [`Value::is_truthy`].
    pub fn compact(&self) -> OrderedMap {
        self.filter(|value, _| value.is_truthy())
    }

    /// Left fold over the values in order.
    pub fn reduce<A, F>(&self, initial: A, mut f: F) -> A
    where
        F: FnMut(A, &Value) -> A,
    {
        self.values().fold(initial, |acc, value| f(acc, value))
    }

    /// Left fold seeded with the first value, starting at the second.
    ///
    /// Returns `None` for an empty map.
    pub fn reduce_first<F>(&self, mut f: F) -> Option<Value>
    where
        F: FnMut(Value, &Value) -> Value,
    {
        let mut values = self.values();
        let first = values.next()?.clone();
        Some(values.fold(first, |acc, value| f(acc, value)))
    }
}

// First / last
impl OrderedMap {
    /// Returns the first value
    pub fn first(&self) -> Option<&Value> {
        self.get_index(0).map(|(_, value)| value)
    }

    /// Returns the first value for which `predicate(value, key)` holds
    pub fn first_where<F>(&self, mut predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Like [`first_where`](Self::first_where), falling back to `default`
    pub fn first_where_or<'a, F>(&'a self, predicate: F, default: &'a Value) -> &'a Value
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.first_where(predicate).unwrap_or(default)
    }

    /// Returns the first key
    pub fn first_key(&self) -> Option<&Key> {
        self.get_index(0).map(|(key, _)| key)
    }

    /// Returns the key of the first entry for which `predicate(value, key)` holds
    pub fn first_key_where<F>(&self, mut predicate: F) -> Option<&Key>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(key, _)| key)
    }

    /// Returns the last value
    pub fn last(&self) -> Option<&Value> {
        self.iter().next_back().map(|(_, value)| value)
    }

    /// Returns the last value for which `predicate(value, key)` holds
    pub fn last_where<F>(&self, mut predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter()
            .rev()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Like [`last_where`](Self::last_where), falling back to `default`
    pub fn last_where_or<'a, F>(&'a self, predicate: F, default: &'a Value) -> &'a Value
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.last_where(predicate).unwrap_or(default)
    }

    /// Returns the last key
    pub fn last_key(&self) -> Option<&Key> {
        self.keys().next_back()
    }

    /// Returns the key of the last entry for which `predicate(value, key)` holds
    pub fn last_key_where<F>(&self, mut predicate: F) -> Option<&Key>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter()
            .rev()
            .find(|(key, value)| predicate(value, key))
            .map(|(key, _)| key)
    }
}

// Set operations and key/value views
impl OrderedMap {
    /// Keeps the entries whose value appears in none of `others`.
    ///
    /// Surviving entries keep their keys and order. Plain sequences can be
    /// passed through [`OrderedMap::from_values`].
    pub fn diff<'a, I>(&self, others: I) -> OrderedMap
    where
        I: IntoIterator<Item = &'a OrderedMap>,
    {
        let excluded: Vec<&Value> = others.into_iter().flat_map(OrderedMap::values).collect();
        self.filter(|value, _| !excluded.contains(&value))
    }

    /// Returns the keys as a list map
    pub fn key_list(&self) -> OrderedMap {
        OrderedMap::from_values(self.keys())
    }

    /// Returns the keys of every leaf as dot-paths, as a list map
    pub fn keys_recursive(&self) -> OrderedMap {
        self.deflate(KeyMode::Paths).key_list()
    }

    /// Returns the values as a list map, dropping the keys
    pub fn values_list(&self) -> OrderedMap {
        OrderedMap::from_values(self.values().cloned())
    }

    /// Returns a new map with the entries in reverse order, keys kept
    pub fn reverse(&self) -> OrderedMap {
        self.iter()
            .rev()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Changes the case of every name key.
    ///
    /// When two keys collide after the change, the later value wins and the
    /// entry stays at the position of the first.
    pub fn change_key_case(&self, case: KeyCase) -> OrderedMap {
        self.iter()
            .map(|(key, value)| {
                let key = match (key, case) {
                    (Key::Name(name), KeyCase::Lower) => Key::Name(name.to_lowercase()),
                    (Key::Name(name), KeyCase::Upper) => Key::Name(name.to_uppercase()),
                    (index, _) => index.clone(),
                };
                (key, value.clone())
            })
            .collect()
    }

    /// Collects the value at `path` from every nested map value.
    ///
    /// With `index_path`, each result is keyed by the value found at that
    /// path in the same row. Rows where the index is missing, or is neither
    /// an integer nor text, take the next free index instead. Rows that are
    /// not maps, or lack `path`, are skipped.
    pub fn column(&self, path: &str, index_path: Option<&str>) -> OrderedMap {
        let mut out = OrderedMap::new();
        for row in self.values().filter_map(Value::as_map) {
            let Some(value) = row.get(path) else {
                continue;
            };

            let key = index_path
                .and_then(|index_path| row.get(index_path))
                .and_then(|index| Key::try_from(index).ok());
            match key {
                Some(key) => {
                    out.insert(key, value.clone());
                }
                None => {
                    out.push(value.clone());
                }
            }
        }
        out
    }

    /// Uses this map's values as keys for `values`.
    ///
    /// # Errors
    ///
    /// Fails if the lengths differ or a value here cannot be a key (only
    /// integers and text can).
    pub fn combine<I>(&self, values: I) -> Result<OrderedMap, CollectionError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() != self.len() {
            return Err(CollectionError::invalid_argument(
                "combine",
                format!("{} keys but {} values", self.len(), values.len()),
            ));
        }

        let mut out = OrderedMap::with_capacity(values.len());
        for (key, value) in self.values().zip(values) {
            out.insert(Key::try_from(key)?, value);
        }
        Ok(out)
    }

    /// Counts how often each integer or text value occurs.
    ///
    /// Other values cannot be keys and are skipped.
    pub fn count_values(&self) -> OrderedMap {
        let mut counts = OrderedMap::new();
        for value in self.values() {
            let Ok(key) = Key::try_from(value) else {
                warn!(kind = value.type_name(), "count_values skipping value");
                continue;
            };
            let count = counts.get_key(key.clone()).map_or(0, |n| n.as_int_or(0));
            counts.insert(key, count + 1);
        }
        counts
    }

    /// Joins the values' display forms with `glue`, using `last_glue`
    /// between the final two values when given.
    ///
    /// ```
    /// # use nestmap::OrderedMap;
    /// let map = OrderedMap::from_values(["a", "b", "c"]);
    /// assert_eq!(map.implode(", ", Some(" and ")), "a, b and c");
    /// assert_eq!(map.implode("", None), "abc");
    /// ```
    pub fn implode(&self, glue: &str, last_glue: Option<&str>) -> String {
        let parts: Vec<String> = self.values().map(ToString::to_string).collect();
        match (parts.split_last(), last_glue) {
            (Some((last, rest)), Some(last_glue)) if !rest.is_empty() => {
                format!("{}{last_glue}{last}", rest.join(glue))
            }
            _ => parts.join(glue),
        }
    }
}

// Sorting
impl OrderedMap {
    /// Stable ascending sort by value; see [`Value::compare`].
    pub fn sort(&self) -> OrderedMap {
        self.sort_by(Value::compare)
    }

    /// Stable descending sort by value
    pub fn reverse_sort(&self) -> OrderedMap {
        self.sort_by(|a, b| b.compare(a))
    }

    /// Stable sort by value with a three-way comparator
    pub fn sort_by<F>(&self, mut compare: F) -> OrderedMap
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut sorted = self.clone();
        sorted.entries.sort_by(|_, a, _, b| compare(a, b));
        sorted
    }

    /// Sort by key; see [`Key`] for the key ordering
    pub fn sort_keys(&self) -> OrderedMap {
        self.sort_keys_by(Key::cmp)
    }

    /// Stable sort by key with a three-way comparator
    pub fn sort_keys_by<F>(&self, mut compare: F) -> OrderedMap
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let mut sorted = self.clone();
        sorted.entries.sort_by(|a, _, b, _| compare(a, b));
        sorted
    }
}

// Partitioning and in-place sequence operations
impl OrderedMap {
    /// Splits the entries into consecutive chunks of `length`.
    ///
    /// Chunks are nested maps under keys `0..`, and the last one may be
    /// shorter.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `length` is zero.
    pub fn chunk(&self, length: usize, keys: ChunkKeys) -> Result<OrderedMap, CollectionError> {
        if length == 0 {
            return Err(CollectionError::invalid_argument(
                "chunk",
                "length must be at least 1",
            ));
        }

        let entries: Vec<(&Key, &Value)> = self.iter().collect();
        let chunks = entries.chunks(length).map(|group| {
            let chunk: OrderedMap = match keys {
                ChunkKeys::Preserve => group
                    .iter()
                    .map(|(key, value)| ((*key).clone(), (*value).clone()))
                    .collect(),
                ChunkKeys::Renumber => {
                    OrderedMap::from_values(group.iter().map(|(_, value)| (*value).clone()))
                }
            };
            Value::Map(chunk)
        });
        Ok(OrderedMap::from_values(chunks))
    }

    /// Appends a value under the next free index; see [`next_index`](Self::next_index).
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let key = self.next_index();
        self.entries.insert(Key::Index(key), value.into());
        self
    }

    /// Appends each value in turn, as [`push`](Self::push) does
    pub fn extend_values<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            self.push(value);
        }
        self
    }

    /// Removes and returns the last value
    pub fn pop(&mut self) -> Option<Value> {
        self.entries.pop().map(|(_, value)| value)
    }

    /// Removes the last `count` values, most recently removed first.
    ///
    /// ```
    /// # use nestmap::OrderedMap;
    /// let mut stack = OrderedMap::from_values([1, 2, 3]);
    /// assert_eq!(stack.pop_many(2)?, OrderedMap::from_values([3, 2]));
    /// assert!(stack.pop_many(2).is_err());
    /// # Ok::<(), nestmap::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `count` exceeds the
    /// length, in which case nothing is removed.
    pub fn pop_many(&mut self, count: usize) -> Result<OrderedMap, CollectionError> {
        self.check_take_count("pop_many", count)?;
        let at = self.len() - count;
        let tail = self.entries.split_off(at);
        Ok(OrderedMap::from_values(tail.into_values().rev()))
    }

    /// Removes and returns the first value.
    ///
    /// Remaining index keys are renumbered from 0; name keys are kept.
    pub fn shift(&mut self) -> Option<Value> {
        let value = self.shift_one();
        self.renumber();
        value
    }

    /// Removes the first `count` values, least recently removed first.
    ///
    /// Fails like [`pop_many`](Self::pop_many) and renumbers like
    /// [`shift`](Self::shift).
    pub fn shift_many(&mut self, count: usize) -> Result<OrderedMap, CollectionError> {
        self.check_take_count("shift_many", count)?;
        if count == 0 {
            return Ok(OrderedMap::new());
        }

        let values: Vec<Value> = self.entries.drain(..count).map(|(_, value)| value).collect();
        self.renumber();
        Ok(OrderedMap::from_values(values))
    }

    fn check_take_count(&self, operation: &str, count: usize) -> Result<(), CollectionError> {
        if count > self.len() {
            return Err(CollectionError::invalid_argument(
                operation,
                format!("cannot remove {count} values from {}", self.len()),
            ));
        }
        Ok(())
    }

    fn shift_one(&mut self) -> Option<Value> {
        self.entries.shift_remove_index(0).map(|(_, value)| value)
    }

    fn renumber(&mut self) {
        let mut next = 0u64;
        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(key, value)| match key {
                Key::Index(_) => {
                    next += 1;
                    (Key::Index(next - 1), value)
                }
                name => (name, value),
            })
            .collect();
    }
}

// Randomness
impl OrderedMap {
    /// Picks a key uniformly at random, or `None` if the map is empty
    pub fn random_key(&self) -> Option<&Key> {
        self.random_key_with(&mut rand::thread_rng())
    }

    /// Picks a key uniformly at random using `rng`
    pub fn random_key_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Key> {
        if self.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.len());
        self.get_index(index).map(|(key, _)| key)
    }

    /// Picks `count` distinct keys uniformly at random.
    ///
    /// The keys are returned as a list map, in the order they appear here.
    ///
    /// # Errors
    ///
    /// Fails if `count` is zero or larger than the map.
    pub fn random_keys(&self, count: usize) -> Result<OrderedMap, CollectionError> {
        self.random_keys_with(count, &mut rand::thread_rng())
    }

    /// Picks `count` distinct keys uniformly at random using `rng`
    pub fn random_keys_with<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<OrderedMap, CollectionError> {
        if count == 0 || count > self.len() {
            return Err(CollectionError::invalid_argument(
                "random_keys",
                format!("count must be between 1 and {}, got {count}", self.len()),
            ));
        }

        let mut picked = rand::seq::index::sample(rng, self.len(), count).into_vec();
        picked.sort_unstable();
        Ok(OrderedMap::from_values(
            picked
                .into_iter()
                .filter_map(|index| self.get_index(index).map(|(key, _)| key)),
        ))
    }

    /// Returns the entries in random order.
    ///
    /// With `keep_keys` false the result is a list map of the shuffled values.
    pub fn shuffle(&self, keep_keys: bool) -> OrderedMap {
        self.shuffle_with(keep_keys, &mut rand::thread_rng())
    }

    /// Returns the entries in random order using `rng`
    pub fn shuffle_with<R: Rng + ?Sized>(&self, keep_keys: bool, rng: &mut R) -> OrderedMap {
        let mut entries: Vec<(&Key, &Value)> = self.iter().collect();
        entries.shuffle(rng);

        if keep_keys {
            entries
                .into_iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        } else {
            OrderedMap::from_values(entries.into_iter().map(|(_, value)| value.clone()))
        }
    }
}
