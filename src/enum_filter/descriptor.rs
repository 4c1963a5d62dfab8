//! Descriptor classification.
//!
//! An enum map entry is either a bare label or a descriptor: a JSON object
//! carrying a `label` field plus any number of extra attributes (color, icon,
//! order, ...). Everything in this module is pure and total.

use serde_json::{Map, Value};

/// Name of the descriptor field holding the display label.
pub const LABEL_FIELD: &str = "label";

/// Returns true only for plain JSON objects.
///
/// Strings, numbers, booleans, arrays and `null` are all plain labels.
pub fn is_plain_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Mirrors the truthiness rules used for label fallback: `null`, `false`,
/// zero, `NaN` and the empty string are falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Display form of a JSON value: strings verbatim, `null` as empty,
/// everything else in its JSON rendering.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A classified enum map entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// The value is used directly as the label.
    Plain(&'a Value),
    /// A structured descriptor with a `label` field and extra attributes.
    Descriptor(&'a Map<String, Value>),
}

impl<'a> Entry<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(fields) => Entry::Descriptor(fields),
            other => Entry::Plain(other),
        }
    }

    pub fn is_descriptor(&self) -> bool {
        matches!(self, Entry::Descriptor(_))
    }

    /// The raw label value, if any.
    pub fn label(&self) -> Option<&'a Value> {
        match *self {
            Entry::Plain(value) => Some(value),
            Entry::Descriptor(fields) => fields.get(LABEL_FIELD),
        }
    }

    /// The label as display text, or `None` when it is missing or falsy.
    pub fn label_text(&self) -> Option<String> {
        self.label()
            .filter(|label| !is_falsy(label))
            .map(display_text)
    }

    /// Every descriptor field except `label`. Plain entries have none.
    pub fn extra(&self) -> Map<String, Value> {
        match self {
            Entry::Plain(_) => Map::new(),
            Entry::Descriptor(fields) => fields
                .iter()
                .filter(|(key, _)| key.as_str() != LABEL_FIELD)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_objects_are_plain_objects() {
        assert!(is_plain_object(&json!({})));
        assert!(is_plain_object(&json!({"label": "A"})));
        assert!(!is_plain_object(&json!("A")));
        assert!(!is_plain_object(&json!(1)));
        assert!(!is_plain_object(&json!(null)));
        assert!(!is_plain_object(&json!(["label"])));
        assert!(!is_plain_object(&json!(true)));
    }

    #[test]
    fn falsy_values() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!(0.0)));
        assert!(is_falsy(&json!("")));
        assert!(!is_falsy(&json!("x")));
        assert!(!is_falsy(&json!(1)));
        assert!(!is_falsy(&json!([])));
        assert!(!is_falsy(&json!({})));
    }

    #[test]
    fn classify_plain_label() {
        let value = json!("Apple");
        let entry = Entry::classify(&value);
        assert!(!entry.is_descriptor());
        assert_eq!(entry.label_text().as_deref(), Some("Apple"));
        assert!(entry.extra().is_empty());
    }

    #[test]
    fn classify_array_is_plain() {
        let value = json!(["a", "b"]);
        let entry = Entry::classify(&value);
        assert!(!entry.is_descriptor());
        assert_eq!(entry.label_text().as_deref(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn descriptor_splits_label_from_extra() {
        let value = json!({"label": "High", "order": 1, "color": "#f00"});
        let entry = Entry::classify(&value);
        assert!(entry.is_descriptor());
        assert_eq!(entry.label_text().as_deref(), Some("High"));

        let extra = entry.extra();
        assert_eq!(extra.len(), 2);
        assert!(!extra.contains_key("label"));
        assert_eq!(extra["order"], json!(1));
        assert_eq!(extra["color"], json!("#f00"));
    }

    #[test]
    fn descriptor_without_label_has_no_label_text() {
        let value = json!({"color": "red"});
        let entry = Entry::classify(&value);
        assert_eq!(entry.label(), None);
        assert_eq!(entry.label_text(), None);
    }

    #[test]
    fn numeric_label_renders_as_text() {
        let value = json!({"label": 42});
        assert_eq!(Entry::classify(&value).label_text().as_deref(), Some("42"));
    }

    #[test]
    fn extra_keeps_field_order() {
        let value = json!({"z": 1, "label": "L", "a": 2, "m": 3});
        let keys: Vec<_> = Entry::classify(&value).extra().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
