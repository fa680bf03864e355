//! Flattening nested maps into path-keyed maps and back.
//!
//! [`OrderedMap::deflate`] walks a nested map depth-first in entry order and
//! emits every non-map leaf once. [`OrderedMap::inflate`] is its inverse: it
//! replays each entry as a [`set`](OrderedMap::set) on a fresh map, so prefix
//! collisions resolve exactly the way repeated writes would (the last entry
//! processed for a prefix wins).
//!
//! For a map with no dotted keys and no empty nested maps,
//! `map.deflate(KeyMode::Paths).inflate() == map`. Empty keys are ordinary
//! segments, so `{a: {"": 1}}` deflates to `{"a.": 1}` and back.
//!
//! An empty nested map has no leaves, so deflating omits that branch
//! entirely: `{a: {}}` deflates to `{}`.

use super::{Key, OrderedMap, Path, Value, path::SEPARATOR};

/// How [`OrderedMap::deflate`] keys the leaves it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Key each leaf by its full dot-path, e.g. `a.b.c`.
    #[default]
    Paths,
    /// Key leaves `0, 1, 2, ...` in traversal order, discarding the paths.
    Sequential,
}

impl OrderedMap {
    /// Flattens this map into a new single-level map.
    ///
    /// ```
    /// # use nestmap::{KeyMode, OrderedMap, Value};
    /// let mut map = OrderedMap::new();
    /// map.set("a.b", 1);
    /// map.set("a.c", 2);
    ///
    /// let paths = map.deflate(KeyMode::Paths);
    /// assert_eq!(paths.get_key("a.b"), Some(&Value::Int(1)));
    ///
    /// let sequential = map.deflate(KeyMode::Sequential);
    /// assert_eq!(sequential, OrderedMap::from_values([1, 2]));
    /// ```
    pub fn deflate(&self, mode: KeyMode) -> OrderedMap {
        let mut out = OrderedMap::new();
        match mode {
            KeyMode::Paths => {
                let mut prefix = String::new();
                deflate_into(self, &mut prefix, true, &mut out);
            }
            KeyMode::Sequential => {
                for leaf in self.leaves() {
                    out.insert(out.len(), leaf.clone());
                }
            }
        }
        out
    }

    /// Rebuilds a nested map from a map whose keys are dot-paths.
    ///
    /// Index keys are copied over as they are. Every name is split into a
    /// path, so `"a..b"` nests `b` under the empty key inside `a`.
    pub fn inflate(&self) -> OrderedMap {
        let mut out = OrderedMap::new();
        for (key, value) in self.iter() {
            match key {
                Key::Name(name) => {
                    out.set_path(Path::new(name), value.clone());
                }
                Key::Index(_) => {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
        out
    }

    /// Returns the non-map leaves in depth-first entry order.
    pub fn leaves(&self) -> impl Iterator<Item = &Value> {
        let mut stack = vec![self.values()];
        std::iter::from_fn(move || {
            loop {
                let top = stack.last_mut()?;
                match top.next() {
                    Some(Value::Map(map)) => stack.push(map.values()),
                    Some(leaf) => return Some(leaf),
                    None => {
                        stack.pop();
                    }
                }
            }
        })
    }
}

// Top-level leaves keep their own key so index keys stay indices.
fn deflate_into(map: &OrderedMap, prefix: &mut String, top: bool, out: &mut OrderedMap) {
    for (key, value) in map.iter() {
        let mark = prefix.len();
        if !top {
            prefix.push(SEPARATOR);
        }
        prefix.push_str(&key.to_string());

        match value {
            Value::Map(nested) => deflate_into(nested, prefix, false, out),
            leaf if top => {
                out.insert(key.clone(), leaf.clone());
            }
            leaf => {
                out.insert(prefix.as_str(), leaf.clone());
            }
        }

        prefix.truncate(mark);
    }
}
