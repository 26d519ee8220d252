//! Public endpoints: fetch a form for rendering, an embeddable HTML
//! fragment, and submission capture. No authentication, payloads still
//! validated.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use formbuilder_core::render::render_form;
use formbuilder_core::sanitize::sanitize_text;
use formbuilder_core::schema::{FormData, SubmittedData, SubmittedValue};

use crate::error::ApiError;
use crate::models::{ApiResponse, PublicForm, SavedForm};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forms/:id/public", get(get_form_public))
        .route("/forms/:id/embed", get(embed_form))
        .route("/submit", post(submit_form))
}

/// Fetch a form for public rendering (no timestamps)
#[utoipa::path(
    get,
    path = "/form-builder/v1/forms/{id}/public",
    params(("id" = i64, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Public form definition"),
        (status = 404, description = "Form not found")
    ),
    tag = "public"
)]
pub async fn get_form_public(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PublicForm>>, ApiError> {
    let row = state
        .store
        .get_form(id)
        .await?
        .ok_or(ApiError::NotFound("Form not found"))?;

    Ok(Json(ApiResponse::success(PublicForm {
        id: row.id,
        name: row.name,
        form_data: FormData::decode(&row.form_data)?,
    })))
}

/// Rendered HTML fragment for embedding in a page
#[utoipa::path(
    get,
    path = "/form-builder/v1/forms/{id}/embed",
    params(("id" = i64, Path, description = "Form ID")),
    responses(
        (status = 200, description = "HTML fragment", content_type = "text/html"),
        (status = 404, description = "Form not found", content_type = "text/html")
    ),
    tag = "public"
)]
pub async fn embed_form(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Html<&'static str>)> {
    if id <= 0 {
        return Err((StatusCode::BAD_REQUEST, Html("<p>Invalid form ID</p>")));
    }
    let row = match state.store.get_form(id).await {
        Ok(Some(row)) => row,
        Ok(None) => return Err((StatusCode::NOT_FOUND, Html("<p>Form not found</p>"))),
        Err(err) => {
            tracing::error!("embed lookup failed: {err}");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<p>Form unavailable</p>"),
            ));
        }
    };
    let data = FormData::decode(&row.form_data)
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, Html("<p>Form unavailable</p>")))?;

    Ok(Html(render_form(row.id, &data.fields)))
}

/// Capture a submission
///
/// `form_id` is a soft reference: no existence check is made, so a
/// submission against a deleted form still succeeds.
#[utoipa::path(
    post,
    path = "/form-builder/v1/submit",
    responses(
        (status = 200, description = "Submission stored", body = SavedForm),
        (status = 400, description = "Invalid payload")
    ),
    tag = "public"
)]
pub async fn submit_form(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ApiResponse<SavedForm>>, ApiError> {
    let (form_id, data) = parse_submit_payload(&body)?;
    let blob = serde_json::to_string(&data).map_err(|e| ApiError::Db(e.to_string()))?;
    let id = state.store.create_submission(form_id, &blob).await?;
    tracing::info!(form_id, submission_id = id, "submission stored");

    Ok(Json(ApiResponse::success(SavedForm {
        id,
        message: "Form submitted successfully".into(),
    })))
}

/// Validate a submit body: an integer-coercible `form_id` and a `data`
/// map. Keys and every scalar value are sanitized before storage.
fn parse_submit_payload(body: &Value) -> Result<(i64, SubmittedData), ApiError> {
    let form_id = match body.get("form_id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    let raw = body.get("data").and_then(Value::as_object);
    let (form_id, raw) = match (form_id, raw) {
        (Some(form_id), Some(raw)) => (form_id, raw),
        _ => {
            return Err(ApiError::InvalidData(
                "form_id and data are required".into(),
            ))
        }
    };

    let mut data = SubmittedData::new();
    for (key, value) in raw {
        let key = sanitize_text(key);
        let value = match value {
            Value::Array(items) => {
                let values = items
                    .iter()
                    .map(|item| scalar(item).map(|s| sanitize_text(&s)))
                    .collect::<Result<Vec<_>, _>>()?;
                SubmittedValue::Many(values)
            }
            other => SubmittedValue::Single(sanitize_text(&scalar(other)?)),
        };
        data.insert(key, value);
    }

    Ok((form_id, data))
}

fn scalar(value: &Value) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(ApiError::InvalidData(
            "submission values must be scalars or arrays of scalars".into(),
        )),
    }
}
