//! Template data values.
//!
//! The service accepts arbitrary JSON for template data, including nested
//! mappings and lists of mappings for repeated sections. [`TemplateValue`]
//! keeps that shape explicit instead of passing raw `serde_json::Value`s around.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A single value bound to a template placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<TemplateValue>),
    Map(TemplateData),
}

impl TemplateValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TemplateValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&TemplateData> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Apply `f` to every string leaf, descending into lists and mappings.
    pub fn map_strings(&mut self, f: &impl Fn(&str) -> String) {
        match self {
            Self::String(value) => *value = f(value),
            Self::List(items) => items.iter_mut().for_each(|item| item.map_strings(f)),
            Self::Map(map) => map.map_strings(f),
            Self::Null | Self::Bool(_) | Self::Number(_) => {}
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for TemplateValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for TemplateValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<TemplateData> for TemplateValue {
    fn from(map: TemplateData) -> Self {
        Self::Map(map)
    }
}

impl From<Value> for TemplateValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().collect()),
        }
    }
}

/// Key/value payload sent alongside a template. Keys are kept sorted so the
/// request body is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateData(BTreeMap<String, TemplateValue>);

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<TemplateValue>,
    ) -> Option<TemplateValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TemplateValue> {
        self.0.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TemplateValue)> {
        self.0.iter()
    }

    pub fn map_strings(&mut self, f: &impl Fn(&str) -> String) {
        self.0.values_mut().for_each(|value| value.map_strings(f));
    }
}

impl<K, V> FromIterator<(K, V)> for TemplateData
where
    K: Into<String>,
    V: Into<TemplateValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_sections_serialize_as_plain_json() {
        let data = TemplateData::new().with("Total", "3000.00").with(
            "Items",
            vec![
                TemplateData::new()
                    .with("Description", "Integration")
                    .with("Amount", "1500.00"),
                TemplateData::new()
                    .with("Description", "Templates")
                    .with("Amount", "800.00"),
            ],
        );

        let encoded = serde_json::to_value(&data).expect("serialize");
        assert_eq!(
            encoded,
            json!({
                "Items": [
                    {"Amount": "1500.00", "Description": "Integration"},
                    {"Amount": "800.00", "Description": "Templates"}
                ],
                "Total": "3000.00"
            })
        );
    }

    #[test]
    fn arbitrary_json_object_is_accepted() {
        let data: TemplateData = serde_json::from_value(json!({
            "Who": "world",
            "Count": 3,
            "Ratio": 0.5,
            "Draft": false,
            "Missing": null,
            "Meta": {"Tags": ["a", "b"]}
        }))
        .expect("deserialize");

        assert_eq!(data.get("Who").and_then(TemplateValue::as_str), Some("world"));
        assert_eq!(data.get("Count"), Some(&TemplateValue::from(3_i64)));
        assert_eq!(data.get("Draft"), Some(&TemplateValue::Bool(false)));
        assert_eq!(data.get("Missing"), Some(&TemplateValue::Null));
        let tags = data
            .get("Meta")
            .and_then(TemplateValue::as_map)
            .and_then(|meta| meta.get("Tags"))
            .and_then(TemplateValue::as_list)
            .expect("tags list");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = serde_json::from_value::<TemplateData>(json!(["not", "a", "map"]));
        assert!(err.is_err());
    }

    #[test]
    fn map_strings_reaches_nested_leaves() {
        let mut data = TemplateData::new()
            .with("Title", "a_b")
            .with("Rows", vec![TemplateData::new().with("Cell", "x_y")])
            .with("Count", 2_i64);

        data.map_strings(&|s| s.replace('_', "-"));

        assert_eq!(data.get("Title").and_then(TemplateValue::as_str), Some("a-b"));
        let row = &data.get("Rows").and_then(TemplateValue::as_list).expect("rows")[0];
        assert_eq!(
            row.as_map()
                .and_then(|m| m.get("Cell"))
                .and_then(TemplateValue::as_str),
            Some("x-y")
        );
        assert_eq!(data.get("Count"), Some(&TemplateValue::from(2_i64)));
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert_eq!(TemplateValue::from(f64::NAN), TemplateValue::Null);
    }
}
