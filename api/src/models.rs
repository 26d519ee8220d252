//! API Models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error payload of a failed envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Response body of create/update/submit operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SavedForm {
    pub id: i64,
    pub message: String,
}

/// Public form shape: the full definition without timestamps.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicForm {
    pub id: i64,
    pub name: String,
    pub form_data: formbuilder_core::FormData,
}
