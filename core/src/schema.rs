//! Field schema and form data model.
//!
//! A form definition is a named, ordered list of [`FieldSpec`] entries.
//! The field schema is a tagged union over the six supported field kinds,
//! so choice-only attributes (`options`) and text-only attributes
//! (`placeholder`) cannot appear on the wrong kind. The wire shape matches
//! the classic flat layout: `{id, type, label, placeholder?, required, options?}`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::FormsError;

/// Current version of the stored field-list representation.
pub const SCHEMA_VERSION: u32 = 1;

/// The six supported field kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Textarea,
    Select,
    Radio,
    Checkbox,
}

impl FieldType {
    /// All field kinds, in palette order.
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
        }
    }

    /// Choice kinds carry an option list instead of a placeholder.
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio | FieldType::Checkbox)
    }
}

/// Kind-specific payload of a field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Email {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Select { options: Vec<String> },
    Radio { options: Vec<String> },
    Checkbox { options: Vec<String> },
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::Email { .. } => FieldType::Email,
            FieldKind::Textarea { .. } => FieldType::Textarea,
            FieldKind::Select { .. } => FieldType::Select,
            FieldKind::Radio { .. } => FieldType::Radio,
            FieldKind::Checkbox { .. } => FieldType::Checkbox,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Select { options }
            | FieldKind::Radio { options }
            | FieldKind::Checkbox { options } => Some(options),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            FieldKind::Text { placeholder }
            | FieldKind::Email { placeholder }
            | FieldKind::Textarea { placeholder } => placeholder.as_deref(),
            _ => None,
        }
    }

    /// Palette default for a freshly added field of the given kind.
    pub fn default_for(field_type: FieldType) -> FieldKind {
        let default_options = || vec!["Option 1".to_string(), "Option 2".to_string()];
        match field_type {
            FieldType::Text => FieldKind::Text { placeholder: None },
            FieldType::Email => FieldKind::Email { placeholder: None },
            FieldType::Textarea => FieldKind::Textarea { placeholder: None },
            FieldType::Select => FieldKind::Select { options: default_options() },
            FieldType::Radio => FieldKind::Radio { options: default_options() },
            FieldType::Checkbox => FieldKind::Checkbox { options: default_options() },
        }
    }
}

/// One schema entry describing a single input.
///
/// The field id doubles as the HTML input name and must be unique within
/// a form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Check the invariants the tagged union cannot express: a non-empty
    /// id and a non-empty option list on choice kinds.
    pub fn validate(&self) -> Result<(), FormsError> {
        if self.id.trim().is_empty() {
            return Err(FormsError::ValidationError("field id must not be empty".into()));
        }
        if let Some(options) = self.kind.options() {
            if options.is_empty() {
                return Err(FormsError::ValidationError(format!(
                    "field '{}' needs at least one option",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Validate every field of a form's field list.
pub fn validate_fields(fields: &[FieldSpec]) -> Result<(), FormsError> {
    for field in fields {
        field.validate()?;
    }
    Ok(())
}

/// Versioned field-list payload, both the stored representation and the
/// `form_data` wire object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormData {
    #[serde(default = "default_version")]
    pub version: u32,
    #[schema(value_type = Vec<Object>)]
    pub fields: Vec<FieldSpec>,
}

fn default_version() -> u32 {
    SCHEMA_VERSION
}

impl FormData {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { version: SCHEMA_VERSION, fields }
    }

    /// Serialize for storage.
    pub fn encode(&self) -> Result<String, FormsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored blob. Pre-versioning blobs (`{"fields": [...]}`)
    /// decode as version 1.
    pub fn decode(blob: &str) -> Result<Self, FormsError> {
        Ok(serde_json::from_str(blob)?)
    }
}

/// Summary row returned by form listings.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FormSummary {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A complete form definition.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FormDefinition {
    pub id: i64,
    pub name: String,
    pub form_data: FormData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A submitted value: single-value fields submit a string, checkbox
/// groups a sequence of strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedValue {
    Single(String),
    Many(Vec<String>),
}

/// Submitted values keyed by field id. Ordered for stable serialization.
pub type SubmittedData = BTreeMap<String, SubmittedValue>;

/// One end-user's captured values for a form.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    pub id: i64,
    /// Soft reference: the form may have been deleted since.
    pub form_id: i64,
    #[schema(value_type = Object)]
    pub data: SubmittedData,
    pub submitted_at: DateTime<Utc>,
}
