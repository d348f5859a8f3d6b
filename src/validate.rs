//! Validator construction and per-field value checking.
//!
//! A [`ValidationRule`] expands into an ordered list of [`Validator`]s:
//! required, min, max, minLength, maxLength, pattern - always in that
//! order. Overall validity is the conjunction of all validators; error
//! rendering reports only the first failing one.
//!
//! Constraints other than `required` skip empty values (`null` or the
//! empty string), so an untouched optional field never fails a bound.

use regex::Regex;
use serde_json::Value;

use crate::error::ValidatorError;
use crate::schema::{FormField, ValidationRule};

/// A single value constraint derived from a validation rule.
#[derive(Debug, Clone)]
pub enum Validator {
    Required,
    Min(f64),
    Max(f64),
    MinLength(usize),
    MaxLength(usize),
    Pattern { regex: Regex, pattern: String },
}

/// A failed constraint, with enough detail for message generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Required,
    Min { min: f64, actual: f64 },
    Max { max: f64, actual: f64 },
    MinLength { min: usize, actual: usize },
    MaxLength { max: usize, actual: usize },
    Pattern { pattern: String },
    /// The value's JSON type cannot satisfy the constraint at all.
    Invalid,
}

/// Build the ordered validator list for a rule.
///
/// A rule with no constraints yields an empty list (always valid).
///
/// # Errors
///
/// Returns [`ValidatorError::InvalidPattern`] if the rule's pattern is not
/// a valid regular expression.
pub fn build_validators(rule: &ValidationRule) -> Result<Vec<Validator>, ValidatorError> {
    let mut validators = Vec::new();

    if rule.required {
        validators.push(Validator::Required);
    }
    if let Some(min) = rule.min {
        validators.push(Validator::Min(min));
    }
    if let Some(max) = rule.max {
        validators.push(Validator::Max(max));
    }
    if let Some(min_length) = rule.min_length {
        validators.push(Validator::MinLength(min_length));
    }
    if let Some(max_length) = rule.max_length {
        validators.push(Validator::MaxLength(max_length));
    }
    if let Some(pattern) = &rule.pattern {
        // Match the full value, not a substring.
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|source| ValidatorError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        validators.push(Validator::Pattern {
            regex,
            pattern: pattern.clone(),
        });
    }

    Ok(validators)
}

/// Build the validator list for a field (empty if it has no rule).
pub fn validators_for(field: &FormField) -> Result<Vec<Validator>, ValidatorError> {
    match &field.validation {
        Some(rule) => build_validators(rule),
        None => Ok(Vec::new()),
    }
}

/// First failing constraint in rule order, or `None` if the value passes.
pub fn first_violation(validators: &[Validator], value: &Value) -> Option<Violation> {
    validators.iter().find_map(|v| v.check(value))
}

impl Validator {
    /// Check a single value against this constraint.
    pub fn check(&self, value: &Value) -> Option<Violation> {
        match self {
            Validator::Required => is_empty(value).then_some(Violation::Required),
            _ if is_empty(value) => None,
            Validator::Min(min) => match numeric(value) {
                Some(actual) if actual < *min => Some(Violation::Min {
                    min: *min,
                    actual,
                }),
                Some(_) => None,
                None => Some(Violation::Invalid),
            },
            Validator::Max(max) => match numeric(value) {
                Some(actual) if actual > *max => Some(Violation::Max {
                    max: *max,
                    actual,
                }),
                Some(_) => None,
                None => Some(Violation::Invalid),
            },
            Validator::MinLength(min) => match value.as_str() {
                Some(s) => {
                    let actual = s.chars().count();
                    (actual < *min).then_some(Violation::MinLength {
                        min: *min,
                        actual,
                    })
                }
                None => Some(Violation::Invalid),
            },
            Validator::MaxLength(max) => match value.as_str() {
                Some(s) => {
                    let actual = s.chars().count();
                    (actual > *max).then_some(Violation::MaxLength {
                        max: *max,
                        actual,
                    })
                }
                None => Some(Violation::Invalid),
            },
            Validator::Pattern { regex, pattern } => match text(value) {
                Some(s) => (!regex.is_match(&s)).then_some(Violation::Pattern {
                    pattern: pattern.clone(),
                }),
                None => Some(Violation::Invalid),
            },
        }
    }
}

/// Render the human-readable message for a violation.
pub fn error_message(violation: &Violation, label: &str) -> String {
    match violation {
        Violation::Required => format!("{label} is required"),
        Violation::Min { min, .. } => format!("{label} must be at least {min}"),
        Violation::Max { max, .. } => format!("{label} must be at most {max}"),
        Violation::MinLength { min, .. } => {
            format!("{label} must be at least {min} characters")
        }
        Violation::MaxLength { max, .. } => {
            format!("{label} must be at most {max} characters")
        }
        Violation::Pattern { .. } => format!("{label} format is invalid"),
        Violation::Invalid => "Invalid value".to_string(),
    }
}

/// Empty for constraint purposes: `null` or the empty string.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Numeric interpretation: JSON numbers directly, numeric strings parsed.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String form used for pattern matching.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(spec: serde_json::Value) -> ValidationRule {
        serde_json::from_value(spec).unwrap()
    }

    #[test]
    fn empty_rule_yields_no_validators() {
        let validators = build_validators(&ValidationRule::default()).unwrap();
        assert!(validators.is_empty());
        assert_eq!(first_violation(&validators, &Value::Null), None);
    }

    #[test]
    fn validators_follow_fixed_order() {
        let rule = rule(json!({
            "required": true,
            "min": 1.0,
            "max": 9.0,
            "minLength": 2,
            "maxLength": 4,
            "pattern": "[a-z]+"
        }));
        let validators = build_validators(&rule).unwrap();
        let kinds: Vec<&str> = validators
            .iter()
            .map(|v| match v {
                Validator::Required => "required",
                Validator::Min(_) => "min",
                Validator::Max(_) => "max",
                Validator::MinLength(_) => "minLength",
                Validator::MaxLength(_) => "maxLength",
                Validator::Pattern { .. } => "pattern",
            })
            .collect();
        assert_eq!(
            kinds,
            ["required", "min", "max", "minLength", "maxLength", "pattern"]
        );
    }

    #[test]
    fn required_fails_on_empty_values() {
        let v = Validator::Required;
        assert_eq!(v.check(&Value::Null), Some(Violation::Required));
        assert_eq!(v.check(&json!("")), Some(Violation::Required));
        assert_eq!(v.check(&json!("x")), None);
        // Unchecked checkbox and zero are present values.
        assert_eq!(v.check(&json!(false)), None);
        assert_eq!(v.check(&json!(0)), None);
    }

    #[test]
    fn bounds_skip_empty_values() {
        let validators = build_validators(&rule(json!({ "min": 5.0 }))).unwrap();
        assert_eq!(first_violation(&validators, &Value::Null), None);
        assert_eq!(first_violation(&validators, &json!("")), None);
    }

    #[test]
    fn min_max_report_bound_and_actual() {
        let validators =
            build_validators(&rule(json!({ "min": 5.0, "max": 10.0 }))).unwrap();

        assert_eq!(
            first_violation(&validators, &json!(3)),
            Some(Violation::Min { min: 5.0, actual: 3.0 })
        );
        assert_eq!(
            first_violation(&validators, &json!(12)),
            Some(Violation::Max { max: 10.0, actual: 12.0 })
        );
        assert_eq!(first_violation(&validators, &json!(7)), None);
    }

    #[test]
    fn numeric_strings_are_coerced_for_bounds() {
        let validators = build_validators(&rule(json!({ "min": 5.0 }))).unwrap();
        assert_eq!(
            first_violation(&validators, &json!("3")),
            Some(Violation::Min { min: 5.0, actual: 3.0 })
        );
        assert_eq!(first_violation(&validators, &json!("8")), None);
    }

    #[test]
    fn length_bounds_count_characters() {
        let validators =
            build_validators(&rule(json!({ "minLength": 3, "maxLength": 5 }))).unwrap();

        assert_eq!(
            first_violation(&validators, &json!("ab")),
            Some(Violation::MinLength { min: 3, actual: 2 })
        );
        assert_eq!(
            first_violation(&validators, &json!("abcdef")),
            Some(Violation::MaxLength { max: 5, actual: 6 })
        );
        assert_eq!(first_violation(&validators, &json!("abcd")), None);
        // Multi-byte characters count once.
        assert_eq!(first_violation(&validators, &json!("héllo")), None);
    }

    #[test]
    fn pattern_matches_full_value() {
        let validators =
            build_validators(&rule(json!({ "pattern": "[0-9]{5}" }))).unwrap();

        assert_eq!(first_violation(&validators, &json!("12345")), None);
        assert_eq!(
            first_violation(&validators, &json!("12345-extra")),
            Some(Violation::Pattern { pattern: "[0-9]{5}".into() })
        );
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let result = build_validators(&rule(json!({ "pattern": "(" })));
        assert!(matches!(
            result,
            Err(ValidatorError::InvalidPattern { pattern, .. }) if pattern == "("
        ));
    }

    #[test]
    fn required_wins_over_later_constraints() {
        let validators =
            build_validators(&rule(json!({ "required": true, "minLength": 3 }))).unwrap();
        assert_eq!(
            first_violation(&validators, &json!("")),
            Some(Violation::Required)
        );
    }

    #[test]
    fn wrong_json_type_for_bound_is_invalid() {
        let validators = build_validators(&rule(json!({ "min": 5.0 }))).unwrap();
        assert_eq!(
            first_violation(&validators, &json!(true)),
            Some(Violation::Invalid)
        );
    }

    #[test]
    fn error_messages_use_field_label() {
        assert_eq!(
            error_message(&Violation::Required, "State"),
            "State is required"
        );
        assert_eq!(
            error_message(&Violation::Min { min: 5.0, actual: 3.0 }, "Age"),
            "Age must be at least 5"
        );
        assert_eq!(
            error_message(&Violation::Max { max: 10.0, actual: 12.0 }, "Age"),
            "Age must be at most 10"
        );
        assert_eq!(
            error_message(&Violation::MinLength { min: 3, actual: 2 }, "Code"),
            "Code must be at least 3 characters"
        );
        assert_eq!(
            error_message(&Violation::MaxLength { max: 5, actual: 6 }, "Code"),
            "Code must be at most 5 characters"
        );
        assert_eq!(
            error_message(&Violation::Pattern { pattern: "x".into() }, "Zip"),
            "Zip format is invalid"
        );
        assert_eq!(error_message(&Violation::Invalid, "Zip"), "Invalid value");
    }
}
