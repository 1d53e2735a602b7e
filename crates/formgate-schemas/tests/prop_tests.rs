//! Property-based tests for the validator
//!
//! These tests verify that validation is deterministic and that the error
//! map is empty exactly when a payload is produced.

use formgate_schemas::{
    calendar, login_schema, signup_schema, DateParts, FieldValue, FormState, Gender, SignupForm,
};
use proptest::prelude::*;

/// Strategy for generating arbitrary field values with controlled depth
fn field_value_strategy() -> impl Strategy<Value = FieldValue> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(FieldValue::Integer),
        (-5i64..40).prop_map(FieldValue::Integer),
        ".{0,12}".prop_map(FieldValue::Text),
    ];

    leaf.prop_recursive(2, 8, 4, |inner| {
        proptest::collection::btree_map("day|month|year|[a-z]{1,6}", inner, 0..4)
            .prop_map(FieldValue::Composite)
    })
}

/// Strategy for generating loosely shaped form states
fn form_state_strategy() -> impl Strategy<Value = FormState> {
    proptest::collection::btree_map(
        "name|password|gender|graduatedFrom|currentlyWorking|dateOfBirth|[a-z]{1,8}",
        field_value_strategy(),
        0..8,
    )
    .prop_map(|fields| {
        let mut state = FormState::new();
        for (k, v) in fields {
            state.set(k, v);
        }
        state
    })
}

/// Strategy for generating typed signup forms near the rule boundaries
fn signup_form_strategy() -> impl Strategy<Value = SignupForm> {
    (
        "[A-Za-z ]{0,60}",
        (-1i64..33, 0usize..13, 1895i64..2030),
        prop::sample::select(Gender::ALL.to_vec()),
        "[A-Za-z ]{0,5}",
        "[A-Za-z ]{0,5}",
        "[A-Za-z0-9!@#]{0,12}",
    )
        .prop_map(|(name, (day, month, year), gender, school, role, password)| {
            let month = if month == 0 { "" } else { calendar::MONTHS[month - 1] };
            SignupForm {
                name,
                date_of_birth: DateParts::new(day, month, year),
                gender,
                graduated_from: school,
                currently_working: role,
                password,
            }
        })
}

proptest! {
    #[test]
    fn validate_is_deterministic(state in form_state_strategy()) {
        let schema = signup_schema(2025);
        prop_assert_eq!(schema.validate(&state), schema.validate(&state));

        let schema = login_schema();
        prop_assert_eq!(schema.validate(&state), schema.validate(&state));
    }

    #[test]
    fn payload_iff_no_errors(form in signup_form_strategy()) {
        let schema = signup_schema(2025);
        match schema.validate(&form.to_form_state()) {
            Ok(payload) => {
                // Every declared field made it into the payload
                for field in schema.field_names() {
                    prop_assert!(payload.get(field).is_some());
                }
            }
            Err(errors) => prop_assert!(!errors.is_empty()),
        }
    }

    #[test]
    fn calendar_check_waits_for_components(form in signup_form_strategy()) {
        if let Err(errors) = signup_schema(2025).validate(&form.to_form_state()) {
            let dob_parts = ["dateOfBirth.day", "dateOfBirth.month", "dateOfBirth.year"];
            if errors.contains("dateOfBirth") {
                // Calendar check only runs once every component passed
                for part in dob_parts {
                    prop_assert!(!errors.contains(part));
                }
            }
        }
    }

    #[test]
    fn errors_only_name_known_paths(form in signup_form_strategy()) {
        let schema = signup_schema(2025);
        if let Err(errors) = schema.validate(&form.to_form_state()) {
            for path in errors.fields() {
                let field = path.split('.').next().unwrap_or(path);
                prop_assert!(schema.get_field(field).is_some(), "unknown path {}", path);
            }
        }
    }

    #[test]
    fn name_length_rule(name in "[a-z]{0,60}") {
        let state = FormState::new()
            .with_text("name", name.as_str())
            .with_text("password", "p");
        let result = login_schema().validate(&state);
        prop_assert_eq!(result.is_ok(), name.chars().count() >= 2);
    }

    #[test]
    fn calendar_agrees_with_days_in_month(day in 1i64..=31, month in 1u32..=12, year in 1900i64..=2100) {
        let max_day = calendar::days_in_month(year as i32, month).unwrap();
        prop_assert_eq!(calendar::compose(day, month, year).is_some(), day as u32 <= max_day);
    }
}
