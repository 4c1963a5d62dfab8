use crate::descriptor::{display_text, Entry, LABEL_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the extra field used for explicit ordering.
pub const ORDER_FIELD: &str = "order";

/// Name of the item field holding the option value.
pub const VALUE_FIELD: &str = "value";

/// One row of a filter's option list.
///
/// Serializes flat: `{"value": ..., "label": ..., <extra fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterListItem {
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilterListItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            extra: Map::new(),
        }
    }

    /// Builds the item for `key` from its classified map entry.
    ///
    /// The label is the raw entry (or descriptor `label`) as display text, so
    /// `0` and `false` stay visible; only a missing or `null` label becomes
    /// `""`. A descriptor `value` field replaces the key as the item value.
    pub fn from_entry(key: &str, entry: Entry<'_>) -> Self {
        let mut extra = entry.extra();
        let value = extra
            .shift_remove(VALUE_FIELD)
            .map(|value| display_text(&value))
            .unwrap_or_else(|| key.to_string());
        Self {
            value,
            label: entry.label().map(display_text).unwrap_or_default(),
            extra,
        }
    }

    /// Adds a field, returning the item for chaining. `value` and `label`
    /// set the item's own fields rather than an extra.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        match field.as_str() {
            VALUE_FIELD => self.value = display_text(&value),
            LABEL_FIELD => self.label = display_text(&value),
            _ => {
                self.extra.insert(field, value);
            }
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.extra.get(field)
    }

    /// The numeric `order` field, if the item carries one.
    pub fn order(&self) -> Option<f64> {
        self.extra.get(ORDER_FIELD).and_then(Value::as_f64)
    }

    pub fn to_value(&self) -> Value {
        let mut fields = Map::with_capacity(self.extra.len() + 2);
        fields.insert("value".to_string(), Value::String(self.value.clone()));
        fields.insert("label".to_string(), Value::String(self.label.clone()));
        for (field, value) in &self.extra {
            if field != VALUE_FIELD && field != LABEL_FIELD {
                fields.insert(field.clone(), value.clone());
            }
        }
        Value::Object(fields)
    }
}
