//! Ordered source maps.
//!
//! [`EnumMap`] holds the enum constants and their labels or descriptors, in
//! insertion order. [`ValueMap`] holds the optional external alias per key.
//! Both are backed by `serde_json::Map` with `preserve_order`, so the order
//! a JSON document declares is the order the filter lists.

use crate::descriptor::Entry;
use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Ordered mapping from enum key to a label or descriptor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct EnumMap {
    entries: Map<String, Value>,
}

impl EnumMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a JSON document, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(FilterError::InvalidMap(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Adds an entry, returning the map for chaining.
    ///
    /// Re-inserting an existing key replaces its value but keeps its position.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Looks up and classifies the entry for `key`.
    pub fn entry(&self, key: &str) -> Option<Entry<'_>> {
        self.entries.get(key).map(Entry::classify)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> serde_json::map::Keys<'_> {
        self.entries.keys()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}

impl TryFrom<Value> for EnumMap {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl Serialize for EnumMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for EnumMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Ordered mapping from enum key to its external alias (a string or number).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ValueMap {
    aliases: Map<String, Value>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every key of `map` to itself.
    pub fn identity(map: &EnumMap) -> Self {
        map.keys()
            .map(|key| (key.clone(), key.clone()))
            .collect()
    }

    /// Builds an alias map from a JSON object whose values are strings or numbers.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(aliases) = value else {
            return Err(FilterError::InvalidMap(format!(
                "value map must be a JSON object, got {}",
                json_kind(&value)
            )));
        };
        if let Some((key, alias)) = aliases
            .iter()
            .find(|(_, alias)| !matches!(alias, Value::String(_) | Value::Number(_)))
        {
            return Err(FilterError::InvalidMap(format!(
                "alias for {key:?} must be a string or number, got {}",
                json_kind(alias)
            )));
        }
        Ok(Self { aliases })
    }

    pub fn with(mut self, key: impl Into<String>, alias: impl Into<Alias>) -> Self {
        self.aliases.insert(key.into(), alias.into().0);
        self
    }

    pub fn alias(&self, key: &str) -> Option<&Value> {
        self.aliases.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.aliases.contains_key(key)
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.aliases.iter()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.aliases.clone())
    }
}

impl TryFrom<Value> for ValueMap {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl Serialize for ValueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.aliases.serialize(serializer)
    }
}

impl<K: Into<String>, V: Into<Alias>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            aliases: iter
                .into_iter()
                .map(|(key, alias)| (key.into(), alias.into().0))
                .collect(),
        }
    }
}

/// An external alias: a JSON string or number, nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias(Value);

impl Alias {
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<&str> for Alias {
    fn from(alias: &str) -> Self {
        Alias(Value::String(alias.to_string()))
    }
}

impl From<String> for Alias {
    fn from(alias: String) -> Self {
        Alias(Value::String(alias))
    }
}

impl From<&String> for Alias {
    fn from(alias: &String) -> Self {
        Alias(Value::String(alias.clone()))
    }
}

impl From<Number> for Alias {
    fn from(alias: Number) -> Self {
        Alias(Value::Number(alias))
    }
}

macro_rules! integer_alias {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Alias {
                fn from(alias: $ty) -> Self {
                    Alias(Value::Number(Number::from(alias)))
                }
            }
        )*
    };
}

integer_alias!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_keeps_declaration_order() {
        let map = EnumMap::from_value(json!({"Z": "Zed", "A": "Ay", "M": "Em"})).unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        for bad in [json!(null), json!("x"), json!([1, 2]), json!(3)] {
            let err = EnumMap::from_value(bad).unwrap_err();
            assert!(matches!(err, FilterError::InvalidMap(_)));
        }
    }

    #[test]
    fn with_reinsert_keeps_position() {
        let map = EnumMap::new()
            .with("A", "Apple")
            .with("B", "Banana")
            .with("A", "Apricot");
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(map.get("A"), Some(&json!("Apricot")));
    }

    #[test]
    fn entry_classifies() {
        let map = EnumMap::new()
            .with("A", "Apple")
            .with("B", json!({"label": "Banana"}));
        assert!(!map.entry("A").unwrap().is_descriptor());
        assert!(map.entry("B").unwrap().is_descriptor());
        assert!(map.entry("C").is_none());
    }

    #[test]
    fn deserializes_from_json_text() {
        let map: EnumMap = serde_json::from_str(r#"{"ON": "On", "OFF": "Off"}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert!(serde_json::from_str::<EnumMap>("[]").is_err());
    }

    #[test]
    fn identity_value_map() {
        let map = EnumMap::new().with("A", "Apple").with("B", "Banana");
        let aliases = ValueMap::identity(&map);
        assert_eq!(aliases.alias("A"), Some(&json!("A")));
        assert_eq!(aliases.alias("B"), Some(&json!("B")));
        assert_eq!(aliases.len(), 2);
    }

    #[test]
    fn value_map_accepts_strings_and_numbers() {
        let aliases = ValueMap::from_value(json!({"A": 1, "B": "2"})).unwrap();
        assert_eq!(aliases.alias("A"), Some(&json!(1)));
        assert_eq!(aliases.alias("B"), Some(&json!("2")));
    }

    #[test]
    fn value_map_rejects_structured_aliases() {
        let err = ValueMap::from_value(json!({"A": {"x": 1}})).unwrap_err();
        assert!(err.to_string().contains("\"A\""));
        assert!(ValueMap::from_value(json!([1])).is_err());
    }

    #[test]
    fn builder_aliases_are_strings_or_numbers() {
        let aliases = ValueMap::new()
            .with("A", 1)
            .with("B", "b")
            .with("C", Number::from_f64(2.5).unwrap())
            .with("D", 7u8);
        for (_, alias) in aliases.iter() {
            assert!(matches!(alias, Value::String(_) | Value::Number(_)));
        }
        assert_eq!(aliases.alias("C"), Some(&json!(2.5)));
        assert_eq!(Alias::from("x").into_value(), json!("x"));

        let collected: ValueMap = [("ON", 1), ("OFF", 0)].into_iter().collect();
        assert_eq!(collected.to_value(), json!({"ON": 1, "OFF": 0}));
    }

    #[test]
    fn serializes_transparently() {
        let map = EnumMap::new().with("A", "Apple");
        assert_eq!(serde_json::to_value(&map).unwrap(), json!({"A": "Apple"}));
    }
}
