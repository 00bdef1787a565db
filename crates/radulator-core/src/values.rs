use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, InputError};
use crate::field::{Field, ScoreRange};

/// One raw answer as submitted by the form.
///
/// Numbers may also arrive as numeric strings; the typed accessors on
/// [`Values`] accept both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// The current answers of one calculator form, keyed by field id.
///
/// Every accessor is total: absent or malformed answers come back as `None`
/// (or the neutral default) rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Option<Value>>")]
pub struct Values(BTreeMap<String, Value>);

impl From<BTreeMap<String, Option<Value>>> for Values {
    fn from(raw: BTreeMap<String, Option<Value>>) -> Self {
        Values(
            raw.into_iter()
                .filter_map(|(id, value)| value.map(|v| (id, v)))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Values(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of answers. `null` members count as unanswered.
    pub fn from_json(json: serde_json::Value) -> Result<Self, CoreError> {
        if !json.is_object() {
            let kind = match json {
                serde_json::Value::Null => "null",
                serde_json::Value::Bool(_) => "a boolean",
                serde_json::Value::Number(_) => "a number",
                serde_json::Value::String(_) => "a string",
                serde_json::Value::Array(_) => "an array",
                serde_json::Value::Object(_) => "an object",
            };
            return Err(CoreError::NotAnObject(kind.to_string()));
        }
        Ok(serde_json::from_value(json)?)
    }

    pub fn with(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(id.into(), value.into());
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<Value> {
        self.0.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Finite numeric answer, accepting numeric strings.
    pub fn number(&self, id: &str) -> Option<f64> {
        let n = match self.0.get(id)? {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            Value::Bool(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    pub fn number_or_zero(&self, id: &str) -> f64 {
        self.number(id).unwrap_or(0.0)
    }

    pub fn flag(&self, id: &str) -> bool {
        match self.0.get(id) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => *n != 0.0 && !n.is_nan(),
            Some(Value::Text(s)) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "on" | "1"
            ),
            None => false,
        }
    }

    /// Selected option of a radio or select field.
    pub fn choice(&self, id: &str) -> Option<&str> {
        match self.0.get(id)? {
            Value::Text(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    pub fn text(&self, id: &str) -> &str {
        match self.0.get(id) {
            Some(Value::Text(s)) => s,
            _ => "",
        }
    }

    pub fn require_number(&self, id: &str, label: &str) -> Result<f64, InputError> {
        self.number(id)
            .ok_or_else(|| InputError::missing(format!("Please enter {label}.")))
    }

    pub fn require_in(
        &self,
        id: &str,
        label: &str,
        range: ScoreRange,
        unit: &str,
    ) -> Result<f64, InputError> {
        let value = self.require_number(id, label)?;
        if range.contains(value) {
            Ok(value)
        } else {
            Err(InputError::out_of_range(label, value, range, unit))
        }
    }

    /// Like [`Values::require_in`] but an absent answer is `Ok(None)`.
    pub fn optional_in(
        &self,
        id: &str,
        label: &str,
        range: ScoreRange,
        unit: &str,
    ) -> Result<Option<f64>, InputError> {
        match self.number(id) {
            None => Ok(None),
            Some(value) if range.contains(value) => Ok(Some(value)),
            Some(value) => Err(InputError::out_of_range(label, value, range, unit)),
        }
    }

    pub fn require_choice(&self, id: &str, message: &str) -> Result<&str, InputError> {
        self.choice(id).ok_or_else(|| InputError::missing(message))
    }

    /// The answers a calculator may rely on: only ids declared by `fields`,
    /// and only fields visible for the remaining answers.
    ///
    /// Hiding is re-evaluated until nothing changes, so a field that depends
    /// on a hidden field is dropped too.
    pub fn restricted_to(&self, fields: &[Field]) -> Values {
        let mut kept = Values(
            self.0
                .iter()
                .filter(|(id, _)| fields.iter().any(|f| f.id == **id))
                .map(|(id, v)| (id.clone(), v.clone()))
                .collect(),
        );

        // Each pass removes at least one answer or stops.
        for _ in 0..=fields.len() {
            let hidden: Vec<&str> = fields
                .iter()
                .filter(|f| kept.contains(&f.id) && !f.is_visible(&kept))
                .map(|f| f.id.as_str())
                .collect();
            if hidden.is_empty() {
                break;
            }
            for id in hidden {
                kept.remove(id);
            }
        }
        kept
    }
}
