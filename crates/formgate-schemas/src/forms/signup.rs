//! Signup form schema, form state and payload
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::validation::{
    calendar, Canonical, CharClass, FieldSchema, FieldValue, FormSchema, FormState, Rule,
    SchemaError, ValidPayload,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest accepted birth year
pub const MIN_BIRTH_YEAR: i64 = 1900;

/// Gender choices offered by the signup picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "prefer-not-to-say")]
    PreferNotToSay,
    #[serde(rename = "MALE")]
    Male,
    #[serde(rename = "FEMALE")]
    Female,
    #[default]
    #[serde(rename = "OTHER")]
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::PreferNotToSay,
        Gender::Male,
        Gender::Female,
        Gender::Other,
    ];

    /// Wire value of this choice
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::PreferNotToSay => "prefer-not-to-say",
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day/month/year components of the date-of-birth picker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    /// 0 until a day is picked
    pub day: i64,
    /// Month name, empty until picked
    pub month: String,
    /// 0 until a year is picked
    pub year: i64,
}

impl DateParts {
    pub fn new(day: i64, month: impl Into<String>, year: i64) -> Self {
        Self {
            day,
            month: month.into(),
            year,
        }
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Composite(
            [
                ("day".to_string(), FieldValue::Integer(self.day)),
                ("month".to_string(), FieldValue::Text(self.month.clone())),
                ("year".to_string(), FieldValue::Integer(self.year)),
            ]
            .into_iter()
            .collect(),
        )
    }
}

/// Signup form state as edited by the user
///
/// `Default` is the state of a freshly mounted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    pub date_of_birth: DateParts,
    pub gender: Gender,
    pub graduated_from: String,
    pub currently_working: String,
    pub password: String,
}

impl SignupForm {
    /// Generic form state keyed by the wire field names
    pub fn to_form_state(&self) -> FormState {
        let mut state = FormState::new()
            .with_text("name", self.name.as_str())
            .with_text("gender", self.gender.as_str())
            .with_text("graduatedFrom", self.graduated_from.as_str())
            .with_text("currentlyWorking", self.currently_working.as_str())
            .with_text("password", self.password.as_str());
        state.set("dateOfBirth", self.date_of_birth.to_field_value());
        state
    }
}

/// Body of the create-user request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub name: String,
    /// RFC 3339 timestamp at midnight UTC
    pub date_of_birth: String,
    pub gender: Gender,
    pub graduated_from: String,
    pub currently_working: String,
    pub password: String,
}

impl TryFrom<ValidPayload> for SignupPayload {
    type Error = SchemaError;

    fn try_from(payload: ValidPayload) -> Result<Self, Self::Error> {
        payload.into_typed("signup")
    }
}

/// Signup schema with the birth year capped at `current_year`
pub fn signup_schema(current_year: i64) -> FormSchema {
    FormSchema::new("signup")
        .field(
            FieldSchema::text("name")
                .rule(Rule::min_length(2, "Name must be at least 2 characters"))
                .rule(Rule::max_length(50, "Name must be at most 50 characters")),
        )
        .field(
            FieldSchema::composite("dateOfBirth")
                .required("Date of birth is required")
                .component(
                    FieldSchema::integer("day")
                        .required("Please select a day")
                        .rule(Rule::range(1, 31, "Please select a valid day")),
                )
                .component(
                    FieldSchema::text("month")
                        .required("Please select a month")
                        .rule(Rule::one_of(calendar::MONTHS, "Please select a valid month")),
                )
                .component(
                    FieldSchema::integer("year")
                        .required("Please select a year")
                        .rule(Rule::range(
                            MIN_BIRTH_YEAR,
                            current_year,
                            "Please select a valid year",
                        )),
                )
                .rule(Rule::calendar_date("day", "month", "year", "Please enter a valid date"))
                .canonical(Canonical::Date {
                    day: "day".to_string(),
                    month: "month".to_string(),
                    year: "year".to_string(),
                }),
        )
        .field(
            FieldSchema::text("gender").rule(Rule::one_of(
                Gender::ALL.iter().map(Gender::as_str),
                "Please select a valid gender",
            )),
        )
        .field(
            FieldSchema::text("graduatedFrom")
                .rule(Rule::min_length(2, "Institution name must be at least 2 characters"))
                .rule(Rule::max_length(100, "Institution name must be at most 100 characters")),
        )
        .field(
            FieldSchema::text("currentlyWorking")
                .rule(Rule::min_length(2, "Current role must be at least 2 characters"))
                .rule(Rule::max_length(100, "Current role must be at most 100 characters")),
        )
        .field(
            FieldSchema::text("password")
                .rule(Rule::min_length(8, "Password must be at least 8 characters"))
                .rule(Rule::contains(
                    CharClass::Uppercase,
                    "Password must contain at least one uppercase letter",
                ))
                .rule(Rule::contains(
                    CharClass::Lowercase,
                    "Password must contain at least one lowercase letter",
                ))
                .rule(Rule::contains(
                    CharClass::Digit,
                    "Password must contain at least one number",
                ))
                .rule(Rule::contains(
                    CharClass::Special,
                    "Password must contain at least one special character",
                )),
        )
}

/// Signup schema for the current local calendar year
pub fn signup_schema_for_today() -> FormSchema {
    signup_schema(i64::from(chrono::Local::now().year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_well_formed() {
        assert!(signup_schema(2025).check().is_ok());
        assert!(signup_schema_for_today().check().is_ok());
    }

    #[test]
    fn test_default_form_matches_fresh_screen() {
        let form = SignupForm::default();
        assert_eq!(form.gender, Gender::Other);
        assert_eq!(form.date_of_birth, DateParts::new(0, "", 0));
        assert!(form.name.is_empty());
    }

    #[test]
    fn test_gender_wire_values() {
        let encoded = serde_json::to_string(&Gender::PreferNotToSay).unwrap();
        assert_eq!(encoded, "\"prefer-not-to-say\"");
        let decoded: Gender = serde_json::from_str("\"FEMALE\"").unwrap();
        assert_eq!(decoded, Gender::Female);
        assert_eq!(Gender::Male.to_string(), "MALE");
    }

    #[test]
    fn test_form_state_uses_wire_names() {
        let form = SignupForm {
            name: "Ada".into(),
            date_of_birth: DateParts::new(10, "December", 1990),
            ..SignupForm::default()
        };
        let state = form.to_form_state();
        assert!(state.get("graduatedFrom").is_some());
        assert!(state.get("currentlyWorking").is_some());
        assert_eq!(state.get("gender"), Some(&FieldValue::text("OTHER")));
        let dob = state.get("dateOfBirth").unwrap();
        assert_eq!(dob.component("month"), Some(&FieldValue::text("December")));
    }
}
