//! Administrative form CRUD endpoints.
//!
//! Bodies are parsed as raw JSON and validated by hand so malformed
//! payloads map onto the `invalid_data`/`invalid_json` taxonomy instead
//! of the framework's default rejection.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use formbuilder_core::sanitize::sanitize_text;
use formbuilder_core::schema::{validate_fields, FieldSpec, FormData};
use formbuilder_core::{FormDefinition, FormSummary, Submission};

use crate::error::ApiError;
use crate::models::{ApiResponse, SavedForm};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forms", get(list_forms).post(create_form))
        .route(
            "/forms/:id",
            get(get_form).put(update_form).delete(delete_form),
        )
        .route("/forms/:id/submissions", get(list_submissions))
}

/// List form summaries, most recently updated first
#[utoipa::path(
    get,
    path = "/form-builder/v1/forms",
    responses(
        (status = 200, description = "Form summaries"),
        (status = 401, description = "Missing management capability")
    ),
    tag = "forms",
    security(("bearer_token" = []))
)]
pub async fn list_forms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FormSummary>>>, ApiError> {
    let forms = state.store.list_forms().await?;
    Ok(Json(ApiResponse::success(forms)))
}

/// Fetch a full form definition
#[utoipa::path(
    get,
    path = "/form-builder/v1/forms/{id}",
    params(("id" = i64, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Form definition"),
        (status = 404, description = "Form not found")
    ),
    tag = "forms",
    security(("bearer_token" = []))
)]
pub async fn get_form(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FormDefinition>>, ApiError> {
    let row = state
        .store
        .get_form(id)
        .await?
        .ok_or(ApiError::NotFound("Form not found"))?;

    Ok(Json(ApiResponse::success(FormDefinition {
        id: row.id,
        name: row.name,
        form_data: FormData::decode(&row.form_data)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })))
}

/// Create a form
#[utoipa::path(
    post,
    path = "/form-builder/v1/forms",
    responses(
        (status = 200, description = "Form created", body = SavedForm),
        (status = 400, description = "Invalid payload")
    ),
    tag = "forms",
    security(("bearer_token" = []))
)]
pub async fn create_form(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ApiResponse<SavedForm>>, ApiError> {
    let (name, fields) = parse_form_payload(&body)?;
    let blob = FormData::new(fields).encode()?;
    let id = state.store.create_form(&name, &blob).await?;
    tracing::info!(form_id = id, "form created");

    Ok(Json(ApiResponse::success(SavedForm {
        id,
        message: "Form created successfully".into(),
    })))
}

/// Update a form
#[utoipa::path(
    put,
    path = "/form-builder/v1/forms/{id}",
    params(("id" = i64, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Form updated", body = SavedForm),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Form not found")
    ),
    tag = "forms",
    security(("bearer_token" = []))
)]
pub async fn update_form(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ApiResponse<SavedForm>>, ApiError> {
    let (name, fields) = parse_form_payload(&body)?;
    let blob = FormData::new(fields).encode()?;

    if !state.store.update_form(id, &name, &blob).await? {
        return Err(ApiError::NotFound("Form not found"));
    }
    tracing::info!(form_id = id, "form updated");

    Ok(Json(ApiResponse::success(SavedForm {
        id,
        message: "Form updated successfully".into(),
    })))
}

/// Delete a form
///
/// Submissions referencing the form are deliberately retained.
#[utoipa::path(
    delete,
    path = "/form-builder/v1/forms/{id}",
    params(("id" = i64, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Form deleted"),
        (status = 404, description = "Form not found or already deleted")
    ),
    tag = "forms",
    security(("bearer_token" = []))
)]
pub async fn delete_form(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    if !state.store.delete_form(id).await? {
        return Err(ApiError::NotFound("Form not found or already deleted"));
    }
    tracing::info!(form_id = id, "form deleted");

    Ok(Json(ApiResponse::success(serde_json::json!({
        "message": "Form deleted successfully"
    }))))
}

/// List submissions captured for a form
///
/// The form itself may already be deleted; orphaned submissions remain
/// readable.
#[utoipa::path(
    get,
    path = "/form-builder/v1/forms/{id}/submissions",
    params(("id" = i64, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Submissions, oldest first")
    ),
    tag = "forms",
    security(("bearer_token" = []))
)]
pub async fn list_submissions(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Submission>>>, ApiError> {
    let submissions = state.store.list_submissions(id).await?;
    Ok(Json(ApiResponse::success(submissions)))
}

/// Validate a create/update body: a non-empty name, a `form_data` object
/// with a `fields` array, and a field array that parses against the
/// schema. The name is sanitized; field values are stored as supplied.
fn parse_form_payload(body: &Value) -> Result<(String, Vec<FieldSpec>), ApiError> {
    let name = body.get("name").and_then(Value::as_str).unwrap_or("");
    let name = sanitize_text(name);
    let form_data = body.get("form_data");
    if name.is_empty() || form_data.is_none() {
        return Err(ApiError::InvalidData(
            "Name and form_data are required".into(),
        ));
    }

    let fields = form_data
        .and_then(|fd| fd.get("fields"))
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::InvalidJson("Invalid form data structure".into()))?;

    let fields: Vec<FieldSpec> = serde_json::from_value(Value::Array(fields.clone()))
        .map_err(|e| ApiError::InvalidJson(format!("Invalid field schema: {e}")))?;
    validate_fields(&fields)?;

    Ok((name, fields))
}
