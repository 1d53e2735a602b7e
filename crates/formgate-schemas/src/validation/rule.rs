//! Tagged rule variants and their predicates
//!
//! Rules are plain data: each variant names its predicate and carries the
//! message reported when it fails. A schema file can therefore declare
//! `{"kind": "min_length", "n": 2, "message": "..."}` directly.
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::validation::calendar;
use crate::validation::schema::FieldKind;
use crate::validation::value::{FieldValue, FormState};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Character categories used by the password composition rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// ASCII `A-Z`
    Uppercase,
    /// ASCII `a-z`
    Lowercase,
    /// ASCII `0-9`
    Digit,
    /// Anything outside `A-Za-z0-9`
    Special,
}

impl CharClass {
    pub fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Uppercase => c.is_ascii_uppercase(),
            CharClass::Lowercase => c.is_ascii_lowercase(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Special => !c.is_ascii_alphanumeric(),
        }
    }
}

/// A single validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Text has at least `n` characters
    MinLength { n: usize, message: String },

    /// Text has at most `n` characters
    MaxLength { n: usize, message: String },

    /// Text contains at least one character of `class`
    Contains { class: CharClass, message: String },

    /// Text matches a regular expression somewhere
    Pattern { regex: String, message: String },

    /// Text is one of the listed values
    OneOf {
        values: Vec<String>,
        message: String,
    },

    /// Integer lies in `min..=max`
    Range { min: i64, max: i64, message: String },

    /// Value equals the value of another field in the same record
    EqualsField { field: String, message: String },

    /// Named components of a composite value form a real calendar date
    CalendarDate {
        day: String,
        month: String,
        year: String,
        message: String,
    },
}

impl Rule {
    pub fn min_length(n: usize, message: impl Into<String>) -> Self {
        Rule::MinLength {
            n,
            message: message.into(),
        }
    }

    pub fn max_length(n: usize, message: impl Into<String>) -> Self {
        Rule::MaxLength {
            n,
            message: message.into(),
        }
    }

    pub fn contains(class: CharClass, message: impl Into<String>) -> Self {
        Rule::Contains {
            class,
            message: message.into(),
        }
    }

    pub fn pattern(regex: impl Into<String>, message: impl Into<String>) -> Self {
        Rule::Pattern {
            regex: regex.into(),
            message: message.into(),
        }
    }

    pub fn one_of<I, S>(values: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::OneOf {
            values: values.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn range(min: i64, max: i64, message: impl Into<String>) -> Self {
        Rule::Range {
            min,
            max,
            message: message.into(),
        }
    }

    pub fn equals_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Rule::EqualsField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn calendar_date(
        day: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Rule::CalendarDate {
            day: day.into(),
            month: month.into(),
            year: year.into(),
            message: message.into(),
        }
    }

    /// Serialized tag of this rule
    pub fn name(&self) -> &'static str {
        match self {
            Rule::MinLength { .. } => "min_length",
            Rule::MaxLength { .. } => "max_length",
            Rule::Contains { .. } => "contains",
            Rule::Pattern { .. } => "pattern",
            Rule::OneOf { .. } => "one_of",
            Rule::Range { .. } => "range",
            Rule::EqualsField { .. } => "equals_field",
            Rule::CalendarDate { .. } => "calendar_date",
        }
    }

    /// Message reported when this rule fails
    pub fn message(&self) -> &str {
        match self {
            Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::Contains { message, .. }
            | Rule::Pattern { message, .. }
            | Rule::OneOf { message, .. }
            | Rule::Range { message, .. }
            | Rule::EqualsField { message, .. }
            | Rule::CalendarDate { message, .. } => message,
        }
    }

    /// Whether this rule can evaluate values of `kind`
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Rule::MinLength { .. }
            | Rule::MaxLength { .. }
            | Rule::Contains { .. }
            | Rule::Pattern { .. }
            | Rule::OneOf { .. } => kind == FieldKind::Text,
            Rule::Range { .. } => kind == FieldKind::Integer,
            Rule::CalendarDate { .. } => kind == FieldKind::Composite,
            Rule::EqualsField { .. } => true,
        }
    }

    /// Evaluate the predicate
    ///
    /// `record` is the whole form, consulted only by cross-field rules. A value
    /// of the wrong shape fails the rule.
    pub fn check(&self, value: &FieldValue, record: &FormState) -> bool {
        match self {
            Rule::MinLength { n, .. } => value
                .as_text()
                .map(|s| s.chars().count() >= *n)
                .unwrap_or(false),
            Rule::MaxLength { n, .. } => value
                .as_text()
                .map(|s| s.chars().count() <= *n)
                .unwrap_or(false),
            Rule::Contains { class, .. } => value
                .as_text()
                .map(|s| s.chars().any(|c| class.matches(c)))
                .unwrap_or(false),
            Rule::Pattern { regex, .. } => match (value.as_text(), Regex::new(regex)) {
                (Some(s), Ok(re)) => re.is_match(s),
                _ => false,
            },
            Rule::OneOf {
                values,
                ..
            } => value
                .as_text()
                .map(|s| values.iter().any(|v| v == s))
                .unwrap_or(false),
            Rule::Range { min, max, .. } => value
                .as_integer()
                .map(|n| (*min..=*max).contains(&n))
                .unwrap_or(false),
            Rule::EqualsField { field, .. } => record.get(field) == Some(value),
            Rule::CalendarDate {
                day,
                month,
                year,
                ..
            } => {
                calendar::compose_value(value, day, month, year).is_some()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> FieldValue {
        FieldValue::text(s)
    }

    #[test]
    fn test_length_counts_characters() {
        let record = FormState::new();
        let rule = Rule::min_length(2, "too short");
        assert!(!rule.check(&text("A"), &record));
        assert!(rule.check(&text("Al"), &record));
        assert!(rule.check(&text("Éé"), &record));

        let rule = Rule::max_length(3, "too long");
        assert!(rule.check(&text("äöü"), &record));
        assert!(!rule.check(&text("abcd"), &record));
    }

    #[test]
    fn test_char_classes() {
        let record = FormState::new();
        assert!(Rule::contains(CharClass::Uppercase, "").check(&text("aB"), &record));
        assert!(!Rule::contains(CharClass::Uppercase, "").check(&text("ab1"), &record));
        assert!(Rule::contains(CharClass::Digit, "").check(&text("a1"), &record));
        assert!(Rule::contains(CharClass::Special, "").check(&text("Abc123!@"), &record));
        assert!(!Rule::contains(CharClass::Special, "").check(&text("Abc12345"), &record));
        assert!(Rule::contains(CharClass::Special, "").check(&text("pass word"), &record));
    }

    #[test]
    fn test_pattern_and_one_of() {
        let record = FormState::new();
        let rule = Rule::pattern("^[a-z]+$", "lowercase only");
        assert!(rule.check(&text("abc"), &record));
        assert!(!rule.check(&text("abC"), &record));
        assert!(!Rule::pattern("(", "broken").check(&text("("), &record));

        let rule = Rule::one_of(["MALE", "FEMALE"], "pick one");
        assert!(rule.check(&text("MALE"), &record));
        assert!(!rule.check(&text("male"), &record));
    }

    #[test]
    fn test_wrong_shape_fails() {
        let record = FormState::new();
        assert!(!Rule::min_length(0, "").check(&FieldValue::Integer(3), &record));
        assert!(!Rule::range(1, 31, "").check(&text("3"), &record));
        assert!(Rule::range(1, 31, "").check(&FieldValue::Integer(31), &record));
        assert!(!Rule::range(1, 31, "").check(&FieldValue::Integer(32), &record));
    }

    #[test]
    fn test_equals_field_reads_record() {
        let record = FormState::new().with_text("password", "Abc123!@");
        let rule = Rule::equals_field("password", "Passwords must match");
        assert!(rule.check(&text("Abc123!@"), &record));
        assert!(!rule.check(&text("Abc123!#"), &record));
    }

    #[test]
    fn test_rules_serialize_with_kind_tag() {
        let rule = Rule::min_length(2, "Name must be at least 2 characters");
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({"kind": "min_length", "n": 2, "message": "Name must be at least 2 characters"})
        );

        let parsed: Rule = serde_json::from_value(json!({
            "kind": "contains",
            "class": "special",
            "message": "needs a symbol"
        }))
        .unwrap();
        assert_eq!(parsed, Rule::contains(CharClass::Special, "needs a symbol"));
        assert_eq!(parsed.name(), "contains");
        assert_eq!(parsed.message(), "needs a symbol");
    }

    #[test]
    fn test_applies_to() {
        assert!(Rule::min_length(1, "").applies_to(FieldKind::Text));
        assert!(!Rule::min_length(1, "").applies_to(FieldKind::Integer));
        assert!(Rule::range(1, 2, "").applies_to(FieldKind::Integer));
        assert!(Rule::calendar_date("d", "m", "y", "").applies_to(FieldKind::Composite));
        assert!(Rule::equals_field("x", "").applies_to(FieldKind::Composite));
    }
}
