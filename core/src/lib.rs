//! Form Builder Platform Core
//!
//! Self-hosted form builder: administrators compose data-collection forms
//! visually, persist them, render them on public pages and collect
//! submissions through a REST API.
//!
//! ## Features
//! - Validated field schema (six field kinds)
//! - SQLite-backed storage for form definitions and submissions
//! - Server-side HTML renderer with strict escaping
//! - Placement directive expansion for embedding forms in page content
//! - Editor state machine and submission collection for clients
//! - Typed async API client

pub mod client;
pub mod editor;
pub mod error;
pub mod render;
pub mod sanitize;
pub mod schema;
pub mod shortcode;
pub mod store;
pub mod submit;

pub use error::{FormsError, Result};
pub use schema::{
    FieldKind, FieldSpec, FieldType, FormData, FormDefinition, FormSummary, Submission,
    SubmittedValue,
};
pub use store::FormStore;
