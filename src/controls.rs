//! Live input controls and visibility reconciliation.
//!
//! Each rendered input owns a [`FieldControl`] holding its current value,
//! active validators, touched flag, and current violation. The rendering
//! layer owns the [`ControlSet`]; the store never retains it.
//! [`sync_controls`] reconciles the set against a derived-view transition:
//! fields that just hid lose their validators and value, fields that just
//! appeared get the validator builder's output back and are revalidated,
//! and unchanged fields are left alone.

use serde_json::Value;
use tracing::debug;

use crate::error::ValidatorError;
use crate::schema::FormField;
use crate::validate::{error_message, first_violation, validators_for, Validator, Violation};
use crate::visibility::DerivedView;

/// One live input control.
#[derive(Debug, Default)]
pub struct FieldControl {
    value: Value,
    validators: Vec<Validator>,
    touched: bool,
    violation: Option<Violation>,
}

impl FieldControl {
    /// Create a control with an initial value and validators, validated
    /// immediately.
    pub fn new(value: Value, validators: Vec<Validator>) -> Self {
        let mut control = Self {
            value,
            validators,
            touched: false,
            violation: None,
        };
        control.revalidate();
        control
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Set the value as a user edit: marks the control touched and
    /// revalidates.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
        self.touched = true;
        self.revalidate();
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }

    pub fn violation(&self) -> Option<&Violation> {
        self.violation.as_ref()
    }

    /// The rendered error message for a touched, invalid control.
    pub fn message(&self, label: &str) -> Option<String> {
        self.violation.as_ref().map(|v| error_message(v, label))
    }

    fn revalidate(&mut self) {
        self.violation = first_violation(&self.validators, &self.value);
    }

    /// Hide transition: drop validators and force the value to `null`.
    /// This is not a user edit; no touched flag, no change event.
    fn deactivate(&mut self) {
        self.validators.clear();
        self.value = Value::Null;
        self.violation = None;
        self.touched = false;
    }

    /// Show transition: reapply validators and revalidate.
    fn activate(&mut self, validators: Vec<Validator>) {
        self.validators = validators;
        self.revalidate();
    }
}

/// The set of live controls for the currently rendered fields, in schema
/// order.
#[derive(Debug, Default)]
pub struct ControlSet {
    controls: Vec<(String, FieldControl)>,
}

impl ControlSet {
    /// Build controls for a list of (visible) fields, seeding each value
    /// from the field's declared default or its type default.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError`] if any field carries an invalid pattern.
    pub fn from_fields(fields: &[FormField]) -> Result<Self, ValidatorError> {
        let mut set = Self::default();
        for field in fields {
            let validators = validators_for(field)?;
            set.controls.push((
                field.id.clone(),
                FieldControl::new(field.initial_value(), validators),
            ));
        }
        Ok(set)
    }

    pub fn control(&self, field_id: &str) -> Option<&FieldControl> {
        self.controls
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, c)| c)
    }

    pub fn control_mut(&mut self, field_id: &str) -> Option<&mut FieldControl> {
        self.controls
            .iter_mut()
            .find(|(id, _)| id == field_id)
            .map(|(_, c)| c)
    }

    /// Apply a user edit to one control. Returns `false` for an unknown id.
    pub fn set_value(&mut self, field_id: &str, value: Value) -> bool {
        match self.control_mut(field_id) {
            Some(control) => {
                control.set_value(value);
                true
            }
            None => false,
        }
    }

    /// All controls pass their active validators.
    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(|(_, c)| c.is_valid())
    }

    pub fn mark_all_touched(&mut self) {
        for (_, control) in &mut self.controls {
            control.mark_touched();
        }
    }

    /// Attempt submission: returns the control values when every control is
    /// valid; otherwise marks all controls touched (so error messages
    /// become visible) and returns `None`. Never mutates the store.
    pub fn submit(&mut self) -> Option<serde_json::Map<String, Value>> {
        if self.is_valid() {
            Some(
                self.controls
                    .iter()
                    .map(|(id, c)| (id.clone(), c.value().clone()))
                    .collect(),
            )
        } else {
            self.mark_all_touched();
            None
        }
    }

    fn insert(&mut self, field_id: String, control: FieldControl) {
        self.controls.push((field_id, control));
    }
}

/// Reconcile controls with a visibility transition of the derived view.
///
/// Runs one pass over the diff between the old and new visible sets; one
/// pass reaches the fixed point because a `showIf` rule reads another
/// field's raw value, never another field's visibility. Fields visible in
/// both views are untouched.
///
/// # Errors
///
/// Returns [`ValidatorError`] if a newly visible field carries an invalid
/// pattern.
pub fn sync_controls(
    controls: &mut ControlSet,
    old_view: &DerivedView,
    new_view: &DerivedView,
) -> Result<(), ValidatorError> {
    for field in &old_view.visible_fields {
        if !new_view.contains(&field.id) {
            if let Some(control) = controls.control_mut(&field.id) {
                debug!(field = %field.id, "field hidden, clearing control");
                control.deactivate();
            }
        }
    }

    for field in &new_view.visible_fields {
        if !old_view.contains(&field.id) {
            let validators = validators_for(field)?;
            debug!(field = %field.id, "field shown, reapplying validators");
            match controls.control_mut(&field.id) {
                Some(control) => control.activate(validators),
                None => controls.insert(
                    field.id.clone(),
                    FieldControl::new(field.initial_value(), validators),
                ),
            }
        }
    }

    Ok(())
}
