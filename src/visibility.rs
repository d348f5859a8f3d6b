//! Conditional visibility and the derived view.
//!
//! Both functions here are pure: they read the schema fields and the raw
//! value map and never touch any other state.

use crate::schema::{FormField, FormMetadata, FormValues};

/// Evaluate a field's visibility against the current raw values.
///
/// A field with no `showIf` rule is always visible. Otherwise it is visible
/// iff the referenced field's raw value is strictly equal to the rule's
/// `equals` literal - equality is by JSON value and type, so the string
/// `"1"` never matches the number `1`, and a missing key matches nothing.
pub fn is_visible(field: &FormField, values: &FormValues) -> bool {
    match &field.show_if {
        None => true,
        Some(rule) => values.get(&rule.field) == Some(&rule.equals),
    }
}

/// The computed pair of visible fields and their metadata.
///
/// `visible_fields` is an ordered subsequence of the schema's fields: the
/// filter is stable and never re-sorts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedView {
    pub visible_fields: Vec<FormField>,
    pub metadata: FormMetadata,
}

impl DerivedView {
    /// Whether a field id is in the visible set.
    pub fn contains(&self, field_id: &str) -> bool {
        self.visible_fields.iter().any(|f| f.id == field_id)
    }
}

/// Compute the derived view for a set of fields and raw values.
///
/// Deterministic and total: any well-formed fields/values pair produces a
/// view, including the empty schema (all counts zero).
pub fn compute_view(fields: &[FormField], values: &FormValues) -> DerivedView {
    let visible_fields: Vec<FormField> = fields
        .iter()
        .filter(|field| is_visible(field, values))
        .cloned()
        .collect();

    let required_fields = visible_fields.iter().filter(|f| f.is_required()).count();
    let metadata = FormMetadata {
        total_fields: visible_fields.len(),
        required_fields,
        optional_fields: visible_fields.len() - required_fields,
    };

    DerivedView {
        visible_fields,
        metadata,
    }
}
