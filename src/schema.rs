//! Form schema data model.
//!
//! Passive definitions for a form document: the schema, its fields, and the
//! validation / conditional-visibility rules attached to them. Wire names
//! follow the JSON documents (`camelCase`, `showIf`, `defaultValue`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw form values keyed by field id.
///
/// The map is not restricted to visible fields; hidden fields may carry
/// stale raw values until the form is reset.
pub type FormValues = serde_json::Map<String, Value>;

/// A complete form schema. Immutable once loaded; a new load replaces it
/// wholesale, never patches it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutHint>,
}

impl FormSchema {
    /// Look up a field by id.
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Layout hint for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutHint {
    pub columns: usize,
}

/// The fixed set of input types a field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    Select,
    Checkbox,
    Date,
}

impl FieldType {
    /// The control value used when a field declares no `defaultValue`.
    pub fn control_default(&self) -> Value {
        match self {
            FieldType::Checkbox => Value::Bool(false),
            FieldType::Number => Value::Null,
            _ => Value::String(String::new()),
        }
    }
}

/// One input definition within a schema.
///
/// Field ids are unique within a schema and a `showIf` rule must reference
/// a *different* field's id; the linter flags violations of both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ConditionalRule>,
    /// Required when `field_type` is [`FieldType::Select`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl FormField {
    /// Whether the field's validation rule marks it required.
    pub fn is_required(&self) -> bool {
        self.validation.as_ref().is_some_and(|v| v.required)
    }

    /// Initial control value: the declared default, or the type default.
    pub fn initial_value(&self) -> Value {
        self.default_value
            .clone()
            .unwrap_or_else(|| self.field_type.control_default())
    }
}

/// Constraints on a field's value. All present constraints are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default)]
    pub required: bool,
    /// Numeric lower bound; meaningful only for number fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Numeric upper bound; meaningful only for number fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression the value must match in full.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Conditional visibility: the field is shown iff the referenced field's
/// current raw value is strictly equal to `equals` (value and type, no
/// coercion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    pub field: String,
    pub equals: Value,
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

/// Counts computed over the currently visible fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormMetadata {
    pub total_fields: usize,
    pub required_fields: usize,
    pub optional_fields: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_full_schema() {
        let schema: FormSchema = serde_json::from_value(json!({
            "id": "contact",
            "title": "Contact",
            "description": "Basic contact form",
            "layout": { "columns": 2 },
            "fields": [
                {
                    "id": "name",
                    "type": "text",
                    "label": "Name",
                    "placeholder": "Your name",
                    "validation": { "required": true, "minLength": 2 }
                },
                {
                    "id": "country",
                    "type": "select",
                    "label": "Country",
                    "defaultValue": "US",
                    "options": [
                        { "value": "US", "label": "United States" },
                        { "value": "CA", "label": "Canada" }
                    ]
                },
                {
                    "id": "state",
                    "type": "text",
                    "label": "State",
                    "showIf": { "field": "country", "equals": "US" }
                }
            ]
        }))
        .unwrap();

        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.layout, Some(LayoutHint { columns: 2 }));

        let name = schema.field("name").unwrap();
        assert_eq!(name.field_type, FieldType::Text);
        assert!(name.is_required());
        assert_eq!(name.validation.as_ref().unwrap().min_length, Some(2));

        let state = schema.field("state").unwrap();
        let rule = state.show_if.as_ref().unwrap();
        assert_eq!(rule.field, "country");
        assert_eq!(rule.equals, json!("US"));
    }

    #[test]
    fn field_type_wire_names() {
        for (name, ty) in [
            ("text", FieldType::Text),
            ("number", FieldType::Number),
            ("textarea", FieldType::Textarea),
            ("select", FieldType::Select),
            ("checkbox", FieldType::Checkbox),
            ("date", FieldType::Date),
        ] {
            let parsed: FieldType = serde_json::from_value(json!(name)).unwrap();
            assert_eq!(parsed, ty);
        }
    }

    #[test]
    fn unknown_field_type_rejected() {
        let result: Result<FieldType, _> = serde_json::from_value(json!("slider"));
        assert!(result.is_err());
    }

    #[test]
    fn control_defaults_per_type() {
        assert_eq!(FieldType::Checkbox.control_default(), json!(false));
        assert_eq!(FieldType::Number.control_default(), Value::Null);
        assert_eq!(FieldType::Text.control_default(), json!(""));
        assert_eq!(FieldType::Select.control_default(), json!(""));
    }

    #[test]
    fn initial_value_prefers_declared_default() {
        let field: FormField = serde_json::from_value(json!({
            "id": "age",
            "type": "number",
            "label": "Age",
            "defaultValue": 21
        }))
        .unwrap();
        assert_eq!(field.initial_value(), json!(21));

        let field: FormField = serde_json::from_value(json!({
            "id": "age",
            "type": "number",
            "label": "Age"
        }))
        .unwrap();
        assert_eq!(field.initial_value(), Value::Null);
    }

    #[test]
    fn validation_rule_defaults() {
        let rule: ValidationRule = serde_json::from_value(json!({})).unwrap();
        assert!(!rule.required);
        assert_eq!(rule, ValidationRule::default());
    }
}
