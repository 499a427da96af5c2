//! Normalization of loosely-typed brief input into a [`FormData`].
//!
//! Browsers and hand-written clients send whatever they have: missing
//! keys, `null`, numbers where text is expected. Everything coming out of
//! here is a defined string or a strict boolean.

use serde_json::Value;

use super::model::{Field, FieldKind, FormData};

/// Build a normalized brief from arbitrary JSON.
///
/// - text fields: strings pass through, `null`/missing become `""`,
///   numbers and booleans become their text form, arrays and objects
///   become their JSON text
/// - flags: JavaScript truthiness (`false`, `null`, `0`, `""` and missing
///   are false)
/// - choices: unknown or missing values fall back to the default
pub fn normalize(raw: &Value) -> FormData {
    let mut data = FormData::default();
    for field in Field::ALL {
        let value = raw.get(field.key()).unwrap_or(&Value::Null);
        match field.kind() {
            FieldKind::Text => {
                // Text fields accept anything.
                let _ = data.set(field, &coerce_text(value));
            }
            FieldKind::Choice => {
                if let Some(s) = value.as_str() {
                    if data.set(field, s).is_err() {
                        tracing::debug!(field = %field, value = s, "Unknown choice, using default");
                    }
                }
            }
            FieldKind::Flag => {
                let flag = if truthy(value) { "true" } else { "false" };
                let _ = data.set(field, flag);
            }
        }
    }
    data
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::brief::{Availability, Plan};

    fn assert_only_strings_and_bools(data: &FormData) {
        let json = serde_json::to_value(data).unwrap();
        for (key, value) in json.as_object().unwrap() {
            assert!(
                value.is_string() || value.is_boolean(),
                "{key} normalized to {value}"
            );
        }
    }

    #[test]
    fn empty_input_gets_defaults() {
        let data = normalize(&json!({}));
        assert_eq!(data, FormData::default());
        assert_eq!(data.availability, Availability::SameDay);
        assert_eq!(data.plan, Plan::Pilot);
        assert_only_strings_and_bools(&data);
    }

    #[test]
    fn non_object_input_gets_defaults() {
        for raw in [json!(null), json!(42), json!("brief"), json!([1, 2])] {
            let data = normalize(&raw);
            assert_eq!(data, FormData::default(), "input {raw}");
        }
    }

    #[test]
    fn nulls_and_numbers_are_coerced() {
        let data = normalize(&json!({
            "name": null,
            "email": 7,
            "company": 3.5,
            "oneLiner": true,
            "mustHaves": ["a", "b"],
            "targetDate": {"month": 6},
            "agreeScope": 1,
            "caseStudyOptIn": null,
        }));
        assert_eq!(data.name, "");
        assert_eq!(data.email, "7");
        assert_eq!(data.company, "3.5");
        assert_eq!(data.one_liner, "true");
        assert_eq!(data.must_haves, "[\"a\",\"b\"]");
        assert_eq!(data.target_date, "{\"month\":6}");
        assert!(data.agree_scope);
        assert!(!data.case_study_opt_in);
        assert_only_strings_and_bools(&data);
    }

    #[test]
    fn flags_follow_truthiness() {
        let cases = [
            (json!(true), true),
            (json!(false), false),
            (json!(0), false),
            (json!(2), true),
            (json!(""), false),
            (json!("false"), true),
            (json!({}), true),
            (json!(null), false),
        ];
        for (value, expected) in cases {
            let data = normalize(&json!({ "agreeScope": value }));
            assert_eq!(data.agree_scope, expected, "agreeScope = {value}");
        }
    }

    #[test]
    fn choices_parse_or_fall_back() {
        let data = normalize(&json!({"availability": "next-day", "plan": "standard"}));
        assert_eq!(data.availability, Availability::NextDay);
        assert_eq!(data.plan, Plan::Standard);

        let data = normalize(&json!({"availability": "someday", "plan": 3}));
        assert_eq!(data.availability, Availability::SameDay);
        assert_eq!(data.plan, Plan::Pilot);
    }

    #[test]
    fn typed_brief_survives_normalization() {
        let original = FormData {
            name: "Jane Founder".into(),
            email: "jane@demo.co".into(),
            availability: Availability::ThreeDays,
            plan: Plan::Pro,
            agree_scope: true,
            case_study_opt_in: true,
            ..Default::default()
        };
        let raw = serde_json::to_value(&original).unwrap();
        assert_eq!(normalize(&raw), original);
    }
}
