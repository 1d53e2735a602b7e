//! Form state and field values
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Current value of a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer input (day and year pickers)
    Integer(i64),
    /// Text input
    Text(String),
    /// Structured value made of named components (e.g. day/month/year)
    Composite(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Build a text value
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Borrow the text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an integer value
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the components, if this is a composite value
    pub fn as_composite(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Composite(parts) => Some(parts),
            _ => None,
        }
    }

    /// Look up a component of a composite value
    pub fn component(&self, name: &str) -> Option<&FieldValue> {
        self.as_composite().and_then(|parts| parts.get(name))
    }

    /// JSON rendering used for payloads
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Integer(n) => Value::from(*n),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Composite(parts) => Value::Object(
                parts
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    fn from_json_at(path: &str, value: &Value) -> SchemaResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(FieldValue::Text(s.clone()))),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Some(FieldValue::Integer(i))),
                None => Err(SchemaError::UnsupportedValue {
                    field: path.to_string(),
                    found: format!("non-integer number {}", n),
                }),
            },
            Value::Object(map) => {
                let mut parts = BTreeMap::new();
                for (key, inner) in map {
                    let child = format!("{}.{}", path, key);
                    if let Some(v) = Self::from_json_at(&child, inner)? {
                        parts.insert(key.clone(), v);
                    }
                }
                Ok(Some(FieldValue::Composite(parts)))
            }
            Value::Bool(b) => Err(SchemaError::UnsupportedValue {
                field: path.to_string(),
                found: format!("boolean {}", b),
            }),
            Value::Array(_) => Err(SchemaError::UnsupportedValue {
                field: path.to_string(),
                found: "array".to_string(),
            }),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// Mapping from field name to current value
///
/// Mutated only by input handlers; the validator reads it and never writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    fields: BTreeMap<String, FieldValue>,
}

impl FormState {
    /// Create an empty form state
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text field (builder style)
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, FieldValue::Text(value.into()));
        self
    }

    /// Set an integer field (builder style)
    pub fn with_integer(mut self, field: impl Into<String>, value: i64) -> Self {
        self.set(field, FieldValue::Integer(value));
        self
    }

    /// Set a composite field from its components (builder style)
    pub fn with_composite<I, K>(mut self, field: impl Into<String>, parts: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        let parts = parts.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.set(field, FieldValue::Composite(parts));
        self
    }

    /// Set or replace a field value
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    /// Update one component of a composite field, creating the composite if needed
    ///
    /// A non-composite value under `field` is replaced.
    pub fn set_component(&mut self, field: &str, component: impl Into<String>, value: FieldValue) {
        let entry = self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| FieldValue::Composite(BTreeMap::new()));
        if !matches!(entry, FieldValue::Composite(_)) {
            *entry = FieldValue::Composite(BTreeMap::new());
        }
        if let FieldValue::Composite(parts) = entry {
            parts.insert(component.into(), value);
        }
    }

    /// Remove a field
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    /// Current value of a field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Iterate over fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a form state from a JSON object
    ///
    /// `null` entries are treated as absent. Booleans, arrays and non-integer
    /// numbers have no field representation and are rejected.
    pub fn from_json(value: &Value) -> SchemaResult<Self> {
        let map = value.as_object().ok_or_else(|| SchemaError::UnsupportedValue {
            field: "$".to_string(),
            found: "a non-object document".to_string(),
        })?;

        let mut state = FormState::new();
        for (key, inner) in map {
            if let Some(v) = FieldValue::from_json_at(key, inner)? {
                state.set(key.clone(), v);
            }
        }
        Ok(state)
    }

    /// JSON rendering of the whole state
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}
