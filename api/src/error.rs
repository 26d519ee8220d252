//! Error taxonomy of the HTTP surface.
//!
//! Every failure leaves the server as an error envelope with a
//! machine-readable code and the matching HTTP status; nothing is
//! swallowed silently.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use formbuilder_core::FormsError;

use crate::models::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    /// Malformed or missing input
    #[error("{0}")]
    InvalidData(String),

    /// Structurally invalid field schema or JSON payload
    #[error("{0}")]
    InvalidJson(String),

    /// Missing or insufficient credentials
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Underlying read/write failure
    #[error("{0}")]
    Db(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidData(_) => "invalid_data",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Db(_) => "db_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidData(_) | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "request failed: {self}");
        }
        let body = ApiResponse::<()>::error(self.code(), &self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<FormsError> for ApiError {
    fn from(err: FormsError) -> Self {
        match err {
            FormsError::FormNotFound => ApiError::NotFound("Form not found"),
            FormsError::ValidationError(msg) => ApiError::InvalidJson(msg),
            FormsError::StorageError(e) => ApiError::Db(e.to_string()),
            FormsError::SerializationError(e) => ApiError::Db(e.to_string()),
        }
    }
}
