//! Typed async client for the form-builder REST API.
//!
//! Every response arrives in the `{success, data}` envelope; failures
//! carry `{success: false, error: {code, message}}` and surface as
//! [`ClientError::Api`] with the HTTP status attached.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{FormDefinition, FormSummary, SubmittedData};

/// Default request path prefix, matching the server's route namespace.
pub const DEFAULT_NAMESPACE: &str = "/form-builder/v1";

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error envelope returned by the server
    #[error("API error: {code} - {message}")]
    Api {
        code: String,
        message: String,
        status: u16,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed response body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, ClientError::Api { status: 400, .. })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Request body for create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPayload {
    pub name: String,
    pub form_data: FormDataPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDataPayload {
    pub fields: Vec<crate::schema::FieldSpec>,
}

/// Response body of create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedForm {
    pub id: i64,
    pub message: String,
}

/// Response body of submit.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReceipt {
    pub id: i64,
    pub message: String,
}

/// Public form shape (no timestamps).
#[derive(Debug, Clone, Deserialize)]
pub struct PublicForm {
    pub id: i64,
    pub name: String,
    pub form_data: crate::schema::FormData,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach the bearer token used for administrative calls.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub async fn list_forms(&self) -> Result<Vec<FormSummary>, ClientError> {
        self.request(reqwest::Method::GET, "/forms", None::<&()>).await
    }

    pub async fn get_form(&self, id: i64) -> Result<FormDefinition, ClientError> {
        self.request(reqwest::Method::GET, &format!("/forms/{id}"), None::<&()>)
            .await
    }

    pub async fn create_form(&self, payload: &FormPayload) -> Result<SavedForm, ClientError> {
        self.request(reqwest::Method::POST, "/forms", Some(payload)).await
    }

    pub async fn update_form(
        &self,
        id: i64,
        payload: &FormPayload,
    ) -> Result<SavedForm, ClientError> {
        self.request(reqwest::Method::PUT, &format!("/forms/{id}"), Some(payload))
            .await
    }

    pub async fn delete_form(&self, id: i64) -> Result<(), ClientError> {
        self.request::<serde_json::Value, _>(
            reqwest::Method::DELETE,
            &format!("/forms/{id}"),
            None::<&()>,
        )
        .await?;
        Ok(())
    }

    /// Public fetch used by rendering clients; requires no token.
    pub async fn get_form_public(&self, id: i64) -> Result<PublicForm, ClientError> {
        self.request(
            reqwest::Method::GET,
            &format!("/forms/{id}/public"),
            None::<&()>,
        )
        .await
    }

    /// Public submit endpoint.
    pub async fn submit(
        &self,
        form_id: i64,
        data: &SubmittedData,
    ) -> Result<SubmitReceipt, ClientError> {
        #[derive(Serialize)]
        struct SubmitBody<'a> {
            form_id: i64,
            data: &'a SubmittedData,
        }
        self.request(
            reqwest::Method::POST,
            "/submit",
            Some(&SubmitBody { form_id, data }),
        )
        .await
    }

    async fn request<T, B>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}{}{}", self.base_url, DEFAULT_NAMESPACE, path);
        let mut request = self.http.request(method, &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let envelope: Envelope<T> = response.json().await?;

        if envelope.success {
            envelope.data.ok_or_else(|| ClientError::Api {
                code: "invalid_json".into(),
                message: "response envelope carried no data".into(),
                status,
            })
        } else {
            let error = envelope.error.unwrap_or(ErrorBody {
                code: "db_error".into(),
                message: "unknown server error".into(),
            });
            Err(ClientError::Api {
                code: error.code,
                message: error.message,
                status,
            })
        }
    }
}
