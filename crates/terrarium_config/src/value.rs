//! Settings values and the settings mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single setting value as read from a tfvars JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum SettingValue {
    String(String),
    Number(Number),
    Bool(bool),
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
    Null,
}

impl SettingValue {
    /// Render the value the way terraform reads a variable from text.
    ///
    /// Strings pass through, booleans become `1`/`0`, numbers use their
    /// decimal form, and lists or maps are serialized as compact JSON.
    pub fn to_var_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Bool(true) => "1".to_string(),
            Self::Bool(false) => "0".to_string(),
            Self::Number(n) => n.to_string(),
            Self::Sequence(items) => Value::Array(items.clone()).to_string(),
            Self::Mapping(map) => Value::Object(map.clone()).to_string(),
            Self::Null => String::new(),
        }
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::String(s),
            Value::Number(n) => Self::Number(n),
            Value::Bool(b) => Self::Bool(b),
            Value::Array(items) => Self::Sequence(items),
            Value::Object(map) => Self::Mapping(map),
            Value::Null => Self::Null,
        }
    }
}

impl From<SettingValue> for Value {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::String(s) => Value::String(s),
            SettingValue::Number(n) => Value::Number(n),
            SettingValue::Bool(b) => Value::Bool(b),
            SettingValue::Sequence(items) => Value::Array(items),
            SettingValue::Mapping(map) => Value::Object(map),
            SettingValue::Null => Value::Null,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Flat mapping of option names to values, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, SettingValue>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    /// Look up a key and render it with [`SettingValue::to_var_string`].
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.0.get(key).map(SettingValue::to_var_string)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: Settings) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K, V> FromIterator<(K, V)> for Settings
where
    K: Into<String>,
    V: Into<SettingValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
