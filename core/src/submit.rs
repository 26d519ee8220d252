//! Submission collection and lifecycle for rendered public forms.
//!
//! A rendered form instance is a list of [`ControlValue`] snapshots, one
//! per named control. Collection mirrors the markup contract: checkboxes
//! accumulate checked values under the field id (array-style `[]` suffix
//! stripped), radios contribute the checked value, everything else its
//! current value. Required validation runs first and blocks the network
//! call entirely.

use thiserror::Error;

use crate::client::{ApiClient, ClientError};
use crate::schema::{SubmittedData, SubmittedValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Email,
    Textarea,
    Select,
    Radio,
    Checkbox,
}

/// Snapshot of one named control in a rendered form.
#[derive(Clone, Debug)]
pub struct ControlValue {
    pub name: String,
    pub kind: ControlKind,
    pub value: String,
    pub checked: bool,
    pub required: bool,
}

impl ControlValue {
    pub fn new(name: &str, kind: ControlKind, value: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            checked: false,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    fn field_id(&self) -> &str {
        self.name.strip_suffix("[]").unwrap_or(&self.name)
    }
}

/// Gather submitted values from a form instance.
///
/// A checkbox group with nothing checked still yields an empty sequence
/// under its key; an unchecked radio group contributes nothing.
pub fn collect_values(controls: &[ControlValue]) -> SubmittedData {
    let mut data = SubmittedData::new();
    for control in controls {
        let key = control.field_id().to_string();
        match control.kind {
            ControlKind::Checkbox => {
                let entry = data
                    .entry(key)
                    .or_insert_with(|| SubmittedValue::Many(Vec::new()));
                if control.checked {
                    if let SubmittedValue::Many(values) = entry {
                        values.push(control.value.clone());
                    }
                }
            }
            ControlKind::Radio => {
                if control.checked {
                    data.insert(key, SubmittedValue::Single(control.value.clone()));
                }
            }
            _ => {
                data.insert(key, SubmittedValue::Single(control.value.clone()));
            }
        }
    }
    data
}

/// Names of required controls that would submit blank.
///
/// Choice groups count as satisfied when any member is checked; the other
/// kinds need a non-blank value.
pub fn missing_required(controls: &[ControlValue]) -> Vec<String> {
    let mut missing = Vec::new();
    for control in controls {
        if !control.required {
            continue;
        }
        let id = control.field_id();
        if missing.iter().any(|m| m == id) {
            continue;
        }
        let satisfied = match control.kind {
            ControlKind::Radio | ControlKind::Checkbox => controls
                .iter()
                .any(|c| c.field_id() == id && c.checked),
            _ => !control.value.trim().is_empty(),
        };
        if !satisfied {
            missing.push(id.to_string());
        }
    }
    missing
}

/// How long a success message stays visible before auto-dismissal.
pub const SUCCESS_MESSAGE_SECS: u64 = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitState {
    Idle,
    /// Network call in flight; the trigger control is disabled.
    Submitting,
    /// Transient message, auto-dismissed after [`SUCCESS_MESSAGE_SECS`].
    Succeeded { message: String },
    /// Persistent message; the trigger is re-enabled.
    Failed { message: String },
}

#[derive(Error, Debug, PartialEq)]
#[error("Please fill in all required fields")]
pub struct RequiredFieldsError {
    /// Offending control names, for per-control error marking.
    pub fields: Vec<String>,
}

/// Drives one rendered form's submission lifecycle.
pub struct SubmitController {
    state: SubmitState,
}

impl Default for SubmitController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitController {
    pub fn new() -> Self {
        Self { state: SubmitState::Idle }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn trigger_disabled(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Validate, post, and on success clear the form's inputs.
    ///
    /// A required-field violation returns before any network traffic and
    /// leaves the controls untouched for error marking.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        form_id: i64,
        controls: &mut [ControlValue],
    ) -> Result<(), RequiredFieldsError> {
        let missing = missing_required(controls);
        if !missing.is_empty() {
            self.state = SubmitState::Failed {
                message: "Please fill in all required fields".into(),
            };
            return Err(RequiredFieldsError { fields: missing });
        }

        let data = collect_values(controls);
        self.state = SubmitState::Submitting;

        match client.submit(form_id, &data).await {
            Ok(receipt) => {
                for control in controls.iter_mut() {
                    control.checked = false;
                    if !matches!(control.kind, ControlKind::Checkbox | ControlKind::Radio) {
                        control.value.clear();
                    }
                }
                self.state = SubmitState::Succeeded { message: receipt.message };
            }
            Err(err) => {
                let message = match err {
                    ClientError::Api { message, .. } => message,
                    _ => "An error occurred. Please try again.".into(),
                };
                self.state = SubmitState::Failed { message };
            }
        }
        Ok(())
    }

    /// Called by the host UI once the success message delay elapses.
    pub fn dismiss_message(&mut self) {
        if matches!(self.state, SubmitState::Succeeded { .. }) {
            self.state = SubmitState::Idle;
        }
    }
}
