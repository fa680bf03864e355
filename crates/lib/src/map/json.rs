//! Serde support and JSON conversion.
//!
//! A list map (see [`OrderedMap::is_list`]) serializes as a sequence. Any
//! other map serializes as a map with string keys. Deserializing accepts both
//! shapes: sequences become list maps and map keys are canonicalised, so
//! `{"0": "a", "1": "b"}` reads back as the list `["a", "b"]`.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};

use super::{CollectionError, Key, OrderedMap, Value};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for OrderedMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, a boolean, a number, a string, a sequence or a map")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Int(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E> {
        Ok(Value::Text(value))
    }

    fn visit_seq<A>(self, seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        MapVisitor.visit_seq(seq).map(Value::Map)
    }

    fn visit_map<A>(self, map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        MapVisitor.visit_map(map).map(Value::Map)
    }
}

struct MapVisitor;

impl<'de> Visitor<'de> for MapVisitor {
    type Value = OrderedMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence or a map")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<OrderedMap, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut map = OrderedMap::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            map.insert(map.len(), value);
        }
        Ok(map)
    }

    fn visit_map<A>(self, mut access: A) -> Result<OrderedMap, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(Key::from(key), value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for OrderedMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MapVisitor)
    }
}

/// JSON numbers become `Int` when they fit in an `i64`, `Float` otherwise.
/// Arrays become list maps.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::from(u),
                (None, None) => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Map(OrderedMap::from_values(items.into_iter().map(Value::from)))
            }
            serde_json::Value::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<serde_json::Value> for OrderedMap {
    type Error = CollectionError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from(json) {
            Value::Map(map) => Ok(map),
            other => Err(CollectionError::Conversion {
                reason: format!("expected a JSON object or array, found {}", other.type_name()),
            }),
        }
    }
}

impl Value {
    /// Converts to a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Fails on NaN or infinite floats, which JSON cannot represent.
    pub fn to_json(&self) -> Result<serde_json::Value, CollectionError> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| CollectionError::Conversion {
                    reason: format!("{f} has no JSON representation"),
                })?,
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Map(map) => map.to_json()?,
        })
    }
}

impl OrderedMap {
    /// Converts to a JSON array for list maps, a JSON object otherwise.
    pub fn to_json(&self) -> Result<serde_json::Value, CollectionError> {
        if self.is_list() {
            return self
                .values()
                .map(Value::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array);
        }

        let mut object = serde_json::Map::with_capacity(self.len());
        for (key, value) in self.iter() {
            object.insert(key.to_string(), value.to_json()?);
        }
        Ok(serde_json::Value::Object(object))
    }

    /// Parses a JSON object or array.
    ///
    /// ```
    /// # use nestmap::OrderedMap;
    /// let map = OrderedMap::from_json_str(r#"{"user": {"name": "Alice"}}"#)?;
    /// assert_eq!(map.get_as::<&str>("user.name"), Some("Alice"));
    /// # Ok::<(), nestmap::Error>(())
    /// ```
    pub fn from_json_str(json: &str) -> crate::Result<OrderedMap> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to a compact JSON string.
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
