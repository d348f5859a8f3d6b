//! Dynform
//!
//! Schema-driven form state engine.
//!
//! A form is described by a declarative JSON schema (fields, validation
//! rules, conditional visibility). The engine holds the raw values and the
//! schema, and recomputes the derived view - which fields are visible,
//! which validators apply, and summary metadata - synchronously on every
//! value change and schema load.
//!
//! # Example
//!
//! ```
//! use dynform::{load_schema_str, FormStore};
//! use serde_json::json;
//!
//! let schema = load_schema_str(r#"{
//!     "id": "signup",
//!     "title": "Sign up",
//!     "fields": [
//!         { "id": "country", "type": "select", "label": "Country",
//!           "options": [ { "value": "US", "label": "United States" },
//!                        { "value": "CA", "label": "Canada" } ] },
//!         { "id": "state", "type": "text", "label": "State",
//!           "showIf": { "field": "country", "equals": "US" },
//!           "validation": { "required": true } }
//!     ]
//! }"#).unwrap();
//!
//! let mut store = FormStore::new();
//! let ticket = store.begin_load();
//! store.resolve_load(ticket, Ok(schema));
//!
//! // "state" is hidden until its dependency matches.
//! assert_eq!(store.view().metadata.total_fields, 1);
//!
//! store.update_value("country", json!("US"));
//! assert_eq!(store.view().metadata.total_fields, 2);
//! assert_eq!(store.view().metadata.required_fields, 1);
//! ```
//!
//! # Error messages
//!
//! | Violation | Message |
//! |-----------|---------|
//! | required | `{label} is required` |
//! | min | `{label} must be at least {min}` |
//! | max | `{label} must be at most {max}` |
//! | minLength | `{label} must be at least {n} characters` |
//! | maxLength | `{label} must be at most {n} characters` |
//! | pattern | `{label} format is invalid` |
//! | (untyped) | `Invalid value` |
//!
//! The first failing constraint in rule order wins; required takes
//! precedence over everything, pattern comes last.

mod controls;
mod error;
mod layout;
mod linter;
mod loader;
mod schema;
mod store;
mod validate;
mod visibility;

pub use controls::{sync_controls, ControlSet, FieldControl};
pub use error::{LoadError, ValidatorError};
pub use layout::{grid_template, organize_into_rows, FieldRow};
pub use linter::{lint_schema, Diagnostic, LintReport, Severity};
pub use loader::{is_url, load_schema, load_schema_auto, load_schema_str};
pub use schema::{
    ConditionalRule, FieldType, FormField, FormMetadata, FormSchema, FormValues, LayoutHint,
    SelectOption, ValidationRule,
};
pub use store::{reduce, FormEvent, FormState, FormStore, LoadTicket};
pub use validate::{
    build_validators, error_message, first_violation, validators_for, Validator, Violation,
};
pub use visibility::{compute_view, is_visible, DerivedView};

#[cfg(feature = "remote")]
pub use loader::load_schema_url;
