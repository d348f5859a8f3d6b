//! The form state store: a pure reducer plus a stateful owner.
//!
//! [`reduce`] is the whole transition table - pure, synchronous, and total.
//! [`FormStore`] owns one [`FormState`], applies events through the
//! reducer, tags schema loads with monotonically increasing tickets so a
//! superseded load can never overwrite a newer result, and notifies
//! subscribers after every transition.

use serde_json::Value;
use tracing::{debug, warn};

use crate::schema::{FormSchema, FormValues};
use crate::visibility::{compute_view, DerivedView};

/// The complete state of one form.
///
/// The store is the sole owner; other components read snapshots and feed
/// events back in, they never mutate this directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub schema: Option<FormSchema>,
    pub values: FormValues,
    pub view: DerivedView,
    pub loading: bool,
    pub error: Option<String>,
}

/// A store transition.
#[derive(Debug, Clone)]
pub enum FormEvent {
    LoadStarted,
    LoadSucceeded { schema: FormSchema },
    LoadFailed { error: String },
    ValueUpdated { field_id: String, value: Value },
    FormReset,
}

/// Apply one event to the state.
///
/// Every transition recomputes the derived view where raw values or the
/// schema changed; recomputation is O(fields) and never partial. A failed
/// load leaves schema, values, and view untouched.
pub fn reduce(mut state: FormState, event: FormEvent) -> FormState {
    match event {
        FormEvent::LoadStarted => {
            state.loading = true;
            state.error = None;
        }
        FormEvent::LoadSucceeded { schema } => {
            // Recompute against whatever raw values currently exist, not
            // against defaults.
            state.view = compute_view(&schema.fields, &state.values);
            state.schema = Some(schema);
            state.loading = false;
            state.error = None;
        }
        FormEvent::LoadFailed { error } => {
            state.loading = false;
            state.error = Some(error);
        }
        FormEvent::ValueUpdated { field_id, value } => {
            state.values.insert(field_id, value);
            state.view = recompute(&state);
        }
        FormEvent::FormReset => {
            state.values = FormValues::new();
            state.view = recompute(&state);
        }
    }
    state
}

fn recompute(state: &FormState) -> DerivedView {
    match &state.schema {
        Some(schema) => compute_view(&schema.fields, &state.values),
        None => DerivedView::default(),
    }
}

/// Ticket identifying one schema load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

type Subscriber = Box<dyn FnMut(&FormState)>;

/// Owner of a [`FormState`] with load tagging and change notification.
#[derive(Default)]
pub struct FormStore {
    state: FormState,
    load_seq: u64,
    subscribers: Vec<Subscriber>,
}

impl FormStore {
    /// Create an empty store: no schema, no values, not loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a schema load: sets the loading flag, clears any prior error,
    /// and returns the ticket the eventual resolution must present.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        let ticket = LoadTicket(self.load_seq);
        debug!(request = ticket.0, "schema load started");
        self.apply(FormEvent::LoadStarted);
        ticket
    }

    /// Resolve a load begun with [`begin_load`](Self::begin_load).
    ///
    /// Returns `false` and leaves the state untouched when the ticket has
    /// been superseded by a newer `begin_load`, so a slow first request can
    /// never overwrite the result of a fast second one.
    pub fn resolve_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<FormSchema, String>,
    ) -> bool {
        if ticket.0 != self.load_seq {
            warn!(
                request = ticket.0,
                current = self.load_seq,
                "ignoring stale schema load resolution"
            );
            return false;
        }
        match result {
            Ok(schema) => {
                debug!(request = ticket.0, schema = %schema.id, "schema load succeeded");
                self.apply(FormEvent::LoadSucceeded { schema });
            }
            Err(error) => {
                debug!(request = ticket.0, %error, "schema load failed");
                self.apply(FormEvent::LoadFailed { error });
            }
        }
        true
    }

    /// Load a schema document from a path or URL through the loader.
    ///
    /// Blocking convenience over `begin_load`/`resolve_load`. Returns
    /// whether the load succeeded; a failure leaves the message in
    /// [`FormState::error`] and the prior schema in place.
    pub fn load_from(&mut self, source: &str) -> bool {
        let ticket = self.begin_load();
        let result = crate::loader::load_schema_auto(source).map_err(|e| e.to_string());
        self.resolve_load(ticket, result) && self.state.error.is_none()
    }

    /// Set one raw value and recompute the derived view.
    pub fn update_value(&mut self, field_id: impl Into<String>, value: Value) {
        self.apply(FormEvent::ValueUpdated {
            field_id: field_id.into(),
            value,
        });
    }

    /// Clear all raw values; conditional fields revert to their
    /// schema-default visibility.
    pub fn reset(&mut self) {
        self.apply(FormEvent::FormReset);
    }

    /// Register a callback invoked with the new state after every
    /// transition.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&FormState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The current derived view snapshot.
    pub fn view(&self) -> &DerivedView {
        &self.state.view
    }

    pub fn values(&self) -> &FormValues {
        &self.state.values
    }

    /// Two-space-indented JSON snapshot of the raw values, for display and
    /// debugging only.
    pub fn values_json(&self) -> String {
        serde_json::to_string_pretty(&self.state.values).unwrap_or_default()
    }

    fn apply(&mut self, event: FormEvent) {
        self.state = reduce(std::mem::take(&mut self.state), event);
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("state", &self.state)
            .field("load_seq", &self.load_seq)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
