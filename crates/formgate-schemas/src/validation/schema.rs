//! Field and form schemas and the validator entry point
//!
//! `FormSchema::validate` is pure: it reads the form state, never writes it,
//! performs no I/O and returns the same result for the same input.
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::validation::calendar;
use crate::validation::error::{ErrorState, SchemaError, SchemaResult};
use crate::validation::rule::Rule;
use crate::validation::value::{FieldValue, FormState};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

const DEFAULT_REQUIRED_MESSAGE: &str = "Required";

/// Shape of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Composite,
}

impl FieldKind {
    /// Whether `value` has this shape
    pub fn matches(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Text, FieldValue::Text(_))
                | (FieldKind::Integer, FieldValue::Integer(_))
                | (FieldKind::Composite, FieldValue::Composite(_))
        )
    }

    fn mismatch_message(&self) -> &'static str {
        match self {
            FieldKind::Text => "Expected text",
            FieldKind::Integer => "Expected a number",
            FieldKind::Composite => "Expected a composite value",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Composite => write!(f, "composite"),
        }
    }
}

/// How a valid field value lands in the submission payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Canonical {
    /// Copied unchanged (composites keep their declared components only)
    #[default]
    AsIs,
    /// Day/month/year components collapsed into one RFC 3339 timestamp
    Date {
        day: String,
        month: String,
        year: String,
    },
}

/// Schema for one field: its shape, rule chain and canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name (component name when nested)
    pub name: String,
    /// Expected value shape
    pub kind: FieldKind,
    /// Message reported when the value is absent
    #[serde(default = "default_required_message")]
    pub required_message: String,
    /// Component schemas of a composite field, evaluated before `rules`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<FieldSchema>,
    /// Rule chain, evaluated in order until the first failure
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Payload encoding of a valid value
    #[serde(default)]
    pub canonical: Canonical,
}

fn default_required_message() -> String {
    DEFAULT_REQUIRED_MESSAGE.to_string()
}

impl FieldSchema {
    fn with_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required_message: default_required_message(),
            components: Vec::new(),
            rules: Vec::new(),
            canonical: Canonical::AsIs,
        }
    }

    /// A text field
    pub fn text(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Text)
    }

    /// An integer field
    pub fn integer(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Integer)
    }

    /// A composite field
    pub fn composite(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Composite)
    }

    /// Set the message reported for an absent value
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }

    /// Append a rule to the chain
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declare a component of a composite field
    pub fn component(mut self, component: FieldSchema) -> Self {
        self.components.push(component);
        self
    }

    /// Set the canonical payload form
    pub fn canonical(mut self, canonical: Canonical) -> Self {
        self.canonical = canonical;
        self
    }

    /// First `(path, message)` this field reports against `record`, if any
    pub fn evaluate(&self, record: &FormState) -> Option<(String, String)> {
        let mut errors = ErrorState::new();
        if self.evaluate_at(&self.name, record.get(&self.name), record, &mut errors) {
            return None;
        }
        let first = errors
            .iter()
            .next()
            .map(|(path, message)| (path.to_string(), message.to_string()));
        first
    }

    /// Evaluate this field at `path`, recording at most one message per path
    ///
    /// Returns whether the field passed.
    fn evaluate_at(
        &self,
        path: &str,
        value: Option<&FieldValue>,
        record: &FormState,
        errors: &mut ErrorState,
    ) -> bool {
        let Some(value) = value else {
            errors.insert(path, self.required_message.as_str());
            return false;
        };

        if !self.kind.matches(value) {
            errors.insert(path, self.kind.mismatch_message());
            return false;
        }

        if self.kind == FieldKind::Composite {
            let mut components_pass = true;
            for component in &self.components {
                let child_path = format!("{}.{}", path, component.name);
                let child = value.component(&component.name);
                components_pass &= component.evaluate_at(&child_path, child, record, errors);
            }
            // Field-level rules only see a composite whose parts are all valid
            if !components_pass {
                return false;
            }
        }

        match self.rules.iter().find(|rule| !rule.check(value, record)) {
            Some(rule) => {
                errors.insert(path, rule.message());
                false
            }
            None => true,
        }
    }

    /// Canonical payload value, `None` if the value cannot be normalized
    fn canonicalize(&self, value: &FieldValue) -> Option<Value> {
        match &self.canonical {
            Canonical::AsIs => match value {
                FieldValue::Composite(parts) if !self.components.is_empty() => {
                    let mut out = Map::new();
                    for component in &self.components {
                        let part = parts.get(&component.name)?;
                        out.insert(component.name.clone(), component.canonicalize(part)?);
                    }
                    Some(Value::Object(out))
                }
                other => Some(other.to_json()),
            },
            Canonical::Date { day, month, year } => calendar::compose_value(value, day, month, year)
                .map(|date| Value::String(calendar::canonical_timestamp(date))),
        }
    }

    fn check(&self, schema: &str, top_level: &HashSet<&str>) -> SchemaResult<()> {
        let component_names: HashSet<&str> =
            self.components.iter().map(|c| c.name.as_str()).collect();
        if component_names.len() != self.components.len() {
            return Err(SchemaError::DuplicateField {
                schema: format!("{}.{}", schema, self.name),
                field: self.name.clone(),
            });
        }

        for rule in &self.rules {
            if !rule.applies_to(self.kind) {
                return Err(SchemaError::RuleKindMismatch {
                    field: self.name.clone(),
                    rule: rule.name().to_string(),
                    kind: self.kind.to_string(),
                });
            }
            match rule {
                Rule::Pattern { regex, .. } => {
                    Regex::new(regex).map_err(|source| SchemaError::InvalidPattern {
                        field: self.name.clone(),
                        pattern: regex.clone(),
                        source,
                    })?;
                }
                Rule::EqualsField { field, .. } if !top_level.contains(field.as_str()) => {
                    return Err(SchemaError::UnknownField {
                        field: self.name.clone(),
                        other: field.clone(),
                    });
                }
                Rule::CalendarDate {
                    day,
                    month,
                    year,
                    ..
                } => {
                    self.check_components(&component_names, [day, month, year])?;
                }
                _ => {}
            }
        }

        if let Canonical::Date { day, month, year } = &self.canonical {
            if self.kind != FieldKind::Composite {
                return Err(SchemaError::RuleKindMismatch {
                    field: self.name.clone(),
                    rule: "canonical date".to_string(),
                    kind: self.kind.to_string(),
                });
            }
            self.check_components(&component_names, [day, month, year])?;
        }

        for component in &self.components {
            component.check(schema, top_level)?;
        }
        Ok(())
    }

    fn check_components(
        &self,
        declared: &HashSet<&str>,
        referenced: [&String; 3],
    ) -> SchemaResult<()> {
        // Undeclared components are only an error when the field declares any
        if declared.is_empty() {
            return Ok(());
        }
        match referenced.iter().find(|name| !declared.contains(name.as_str())) {
            Some(missing) => Err(SchemaError::UnknownComponent {
                field: self.name.clone(),
                component: (*missing).clone(),
            }),
            None => Ok(()),
        }
    }
}

/// A normalized submission payload: declared fields only, in canonical form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidPayload(Map<String, Value>);

impl ValidPayload {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The payload as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Deserialize into a typed payload struct
    pub fn into_typed<T: DeserializeOwned>(self, form: &str) -> SchemaResult<T> {
        serde_json::from_value(self.into_value()).map_err(|source| SchemaError::PayloadShape {
            form: form.to_string(),
            source,
        })
    }
}

/// Ordered set of field schemas making up one form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Form name, used in logs and error messages
    pub name: String,
    /// Declared fields, validated in this order
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field (builder style)
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a declared field
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declared field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Check that every rule can be evaluated
    ///
    /// Catches uncompilable patterns, rules on the wrong field kind, and
    /// references to undeclared fields or components.
    pub fn check(&self) -> SchemaResult<()> {
        let top_level: HashSet<&str> = self.field_names().collect();
        if top_level.len() != self.fields.len() {
            let mut seen = HashSet::new();
            let duplicate = self
                .fields
                .iter()
                .find(|f| !seen.insert(f.name.as_str()))
                .map(|f| f.name.clone())
                .unwrap_or_default();
            return Err(SchemaError::DuplicateField {
                schema: self.name.clone(),
                field: duplicate,
            });
        }

        for field in &self.fields {
            field.check(&self.name, &top_level)?;
        }
        Ok(())
    }

    /// Validate a form state
    ///
    /// Every declared field is evaluated; each contributes at most one message
    /// per path (the first failing rule). Undeclared fields in `record` are
    /// ignored and never reach the payload.
    pub fn validate(&self, record: &FormState) -> Result<ValidPayload, ErrorState> {
        let mut errors = ErrorState::new();
        let mut payload = Map::new();

        for field in &self.fields {
            let value = record.get(&field.name);
            if !field.evaluate_at(&field.name, value, record, &mut errors) {
                continue;
            }
            match value.and_then(|v| field.canonicalize(v)) {
                Some(json) => {
                    payload.insert(field.name.clone(), json);
                }
                None => errors.insert(field.name.as_str(), "Value cannot be normalized"),
            }
        }

        if errors.is_empty() {
            Ok(ValidPayload(payload))
        } else {
            Err(errors)
        }
    }

    /// Parse a schema from JSON and check it
    pub fn from_json_str(input: &str) -> SchemaResult<Self> {
        let schema: FormSchema =
            serde_json::from_str(input).map_err(|source| SchemaError::PayloadShape {
                form: "schema".to_string(),
                source,
            })?;
        schema.check()?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rule::CharClass;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date_field() -> FieldSchema {
        FieldSchema::composite("dob")
            .component(FieldSchema::integer("day").rule(Rule::range(1, 31, "bad day")))
            .component(FieldSchema::text("month").rule(Rule::one_of(calendar::MONTHS, "bad month")))
            .component(FieldSchema::integer("year").rule(Rule::range(1900, 2025, "bad year")))
            .rule(Rule::calendar_date("day", "month", "year", "bad date"))
            .canonical(Canonical::Date {
                day: "day".into(),
                month: "month".into(),
                year: "year".into(),
            })
    }

    #[test]
    fn test_evaluate_single_field() {
        let field = date_field();
        let record = FormState::new().with_composite(
            "dob",
            [
                ("day", FieldValue::Integer(31)),
                ("month", FieldValue::text("April")),
                ("year", FieldValue::Integer(2001)),
            ],
        );
        assert_eq!(
            field.evaluate(&record),
            Some(("dob".to_string(), "bad date".to_string()))
        );

        let missing = FieldSchema::text("name").required("Name is required");
        assert_eq!(
            missing.evaluate(&FormState::new()),
            Some(("name".to_string(), "Name is required".to_string()))
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let schema = FormSchema::new("t").field(
            FieldSchema::text("pw")
                .rule(Rule::min_length(8, "short"))
                .rule(Rule::contains(CharClass::Uppercase, "upper"))
                .rule(Rule::contains(CharClass::Digit, "digit")),
        );

        let errors = schema.validate(&FormState::new().with_text("pw", "abc")).unwrap_err();
        assert_eq!(errors.get("pw"), Some("short"));

        let errors = schema.validate(&FormState::new().with_text("pw", "abcdefgh")).unwrap_err();
        assert_eq!(errors.get("pw"), Some("upper"));

        let errors = schema.validate(&FormState::new().with_text("pw", "Abcdefgh")).unwrap_err();
        assert_eq!(errors.get("pw"), Some("digit"));
    }

    #[test]
    fn test_missing_and_mismatched_fields() {
        let schema = FormSchema::new("t")
            .field(FieldSchema::text("name").required("Name is required"))
            .field(FieldSchema::integer("age"));

        let errors = schema
            .validate(&FormState::new().with_text("age", "ten"))
            .unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("age"), Some("Expected a number"));
    }

    #[test]
    fn test_component_errors_use_dotted_paths() {
        let schema = FormSchema::new("t").field(date_field());
        let state = FormState::new().with_composite(
            "dob",
            [
                ("day", FieldValue::Integer(0)),
                ("month", FieldValue::text("")),
                ("year", FieldValue::Integer(2001)),
            ],
        );

        let errors = schema.validate(&state).unwrap_err();
        assert_eq!(errors.get("dob.day"), Some("bad day"));
        assert_eq!(errors.get("dob.month"), Some("bad month"));
        assert!(!errors.contains("dob.year"));
        // Field-level rule is skipped while components fail
        assert!(!errors.contains("dob"));
    }

    #[test]
    fn test_calendar_rule_reports_on_composite_field() {
        let schema = FormSchema::new("t").field(date_field());
        let state = FormState::new().with_composite(
            "dob",
            [
                ("day", FieldValue::Integer(31)),
                ("month", FieldValue::text("April")),
                ("year", FieldValue::Integer(2001)),
            ],
        );

        let errors = schema.validate(&state).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("dob"), Some("bad date"));
    }

    #[test]
    fn test_payload_collapses_date_and_drops_extras() {
        let schema = FormSchema::new("t")
            .field(FieldSchema::text("name"))
            .field(date_field());
        let state = FormState::new()
            .with_text("name", "Al")
            .with_text("ignored", "x")
            .with_composite(
                "dob",
                [
                    ("day", FieldValue::Integer(29)),
                    ("month", FieldValue::text("February")),
                    ("year", FieldValue::Integer(2024)),
                ],
            );

        let payload = schema.validate(&state).unwrap();
        assert_eq!(
            payload.to_value(),
            json!({"name": "Al", "dob": "2024-02-29T00:00:00.000Z"})
        );
    }

    #[test]
    fn test_as_is_composite_keeps_declared_components() {
        let schema = FormSchema::new("t").field(
            FieldSchema::composite("range")
                .component(FieldSchema::integer("low"))
                .component(FieldSchema::integer("high")),
        );
        let state = FormState::new().with_composite(
            "range",
            [
                ("low", FieldValue::Integer(1)),
                ("high", FieldValue::Integer(5)),
                ("note", FieldValue::text("dropped")),
            ],
        );

        let payload = schema.validate(&state).unwrap();
        assert_eq!(payload.to_value(), json!({"range": {"low": 1, "high": 5}}));
    }

    #[test]
    fn test_check_rejects_bad_schemas() {
        let bad_pattern = FormSchema::new("t")
            .field(FieldSchema::text("a").rule(Rule::pattern("([", "never")));
        assert!(matches!(bad_pattern.check(), Err(SchemaError::InvalidPattern { .. })));

        let wrong_kind = FormSchema::new("t")
            .field(FieldSchema::integer("a").rule(Rule::min_length(1, "never")));
        assert!(matches!(wrong_kind.check(), Err(SchemaError::RuleKindMismatch { .. })));

        let duplicate = FormSchema::new("t")
            .field(FieldSchema::text("a"))
            .field(FieldSchema::text("a"));
        assert!(matches!(duplicate.check(), Err(SchemaError::DuplicateField { .. })));

        let unknown_field = FormSchema::new("t")
            .field(FieldSchema::text("confirm").rule(Rule::equals_field("password", "must match")));
        assert!(matches!(unknown_field.check(), Err(SchemaError::UnknownField { .. })));

        let unknown_component = FormSchema::new("t").field(
            FieldSchema::composite("dob")
                .component(FieldSchema::integer("day"))
                .rule(Rule::calendar_date("day", "month", "year", "bad")),
        );
        assert!(matches!(unknown_component.check(), Err(SchemaError::UnknownComponent { .. })));

        assert!(FormSchema::new("t").field(date_field()).check().is_ok());
    }

    #[test]
    fn test_schema_round_trips_through_json() {
        let schema = FormSchema::new("t").field(date_field());
        let encoded = serde_json::to_string(&schema).unwrap();
        let decoded = FormSchema::from_json_str(&encoded).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_schema_defaults_when_parsing() {
        let schema = FormSchema::from_json_str(
            r#"{"name": "mini", "fields": [{"name": "nick", "kind": "text"}]}"#,
        )
        .unwrap();
        let field = schema.get_field("nick").unwrap();
        assert_eq!(field.required_message, "Required");
        assert_eq!(field.canonical, Canonical::AsIs);
        assert!(field.rules.is_empty());
    }
}
