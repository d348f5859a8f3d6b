//! Static analysis of form schemas.
//!
//! Flags violations of the schema invariants before a document drives a
//! live form:
//! - duplicate field ids
//! - `showIf` referencing the field's own id (undefined behavior at
//!   runtime) or an id that appears nowhere in the schema
//! - select fields without options
//! - unsatisfiable bounds (`min` > `max`, `minLength` > `maxLength`)
//! - patterns that fail to compile
//! - numeric/length bounds on field types they are not meaningful for

use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;

use crate::schema::{FieldType, FormField, FormSchema};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic from linting.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    /// Id of the field the finding is about.
    pub field: String,
    pub message: String,
}

/// Aggregated lint findings for one schema.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    /// True when no error-severity findings exist.
    pub fn is_ok(&self) -> bool {
        self.errors() == 0
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn error(&mut self, code: &'static str, field: &str, message: String) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            code,
            field: field.to_string(),
            message,
        });
    }

    fn warning(&mut self, code: &'static str, field: &str, message: String) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            code,
            field: field.to_string(),
            message,
        });
    }
}

/// Lint a schema against the model invariants.
pub fn lint_schema(schema: &FormSchema) -> LintReport {
    let mut report = LintReport::default();

    let known_ids: HashSet<&str> = schema.fields.iter().map(|f| f.id.as_str()).collect();
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for field in &schema.fields {
        if !seen_ids.insert(&field.id) {
            report.error(
                "E001",
                &field.id,
                format!("duplicate field id \"{}\"", field.id),
            );
        }

        if let Some(rule) = &field.show_if {
            if rule.field == field.id {
                report.error(
                    "E002",
                    &field.id,
                    "showIf references the field's own id".to_string(),
                );
            } else if !known_ids.contains(rule.field.as_str()) {
                report.warning(
                    "W001",
                    &field.id,
                    format!(
                        "showIf references \"{}\", which is not a field in this schema",
                        rule.field
                    ),
                );
            }
        }

        if field.field_type == FieldType::Select
            && field.options.as_ref().map_or(true, |o| o.is_empty())
        {
            report.error(
                "E003",
                &field.id,
                "select field has no options".to_string(),
            );
        }

        check_validation(field, &mut report);
    }

    report
}

fn check_validation(field: &FormField, report: &mut LintReport) {
    let Some(rule) = &field.validation else {
        return;
    };

    if let (Some(min), Some(max)) = (rule.min, rule.max) {
        if min > max {
            report.error(
                "E004",
                &field.id,
                format!("min {min} exceeds max {max}"),
            );
        }
    }

    if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
        if min > max {
            report.error(
                "E005",
                &field.id,
                format!("minLength {min} exceeds maxLength {max}"),
            );
        }
    }

    if let Some(pattern) = &rule.pattern {
        if let Err(e) = Regex::new(pattern) {
            report.error("E006", &field.id, format!("invalid pattern: {e}"));
        }
    }

    if (rule.min.is_some() || rule.max.is_some()) && field.field_type != FieldType::Number {
        report.warning(
            "W002",
            &field.id,
            "min/max bounds are only meaningful for number fields".to_string(),
        );
    }

    let string_bearing = matches!(
        field.field_type,
        FieldType::Text | FieldType::Textarea | FieldType::Select | FieldType::Date
    );
    if (rule.min_length.is_some() || rule.max_length.is_some()) && !string_bearing {
        report.warning(
            "W003",
            &field.id,
            "length bounds are only meaningful for string fields".to_string(),
        );
    }
}
