//! Bearer-token authentication for administrative endpoints.
//!
//! Session infrastructure lives with the host platform; this service only
//! verifies that administrative calls carry a signed token whose claims
//! include the form-management capability.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// Capability required by the form CRUD endpoints.
pub const MANAGE_FORMS: &str = "manage_forms";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub capabilities: Vec<String>,
    pub exp: usize,
}

pub fn create_token(
    secret: &str,
    subject: &str,
    capabilities: &[&str],
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(8))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: subject.to_string(),
        capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        exp: expiration,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Middleware guarding the administrative routes.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized("missing bearer token"))?;

    let claims = verify_token(&state.config.jwt_secret, token)
        .map_err(|_| ApiError::Unauthorized("invalid bearer token"))?;

    if !claims.capabilities.iter().any(|c| c == MANAGE_FORMS) {
        return Err(ApiError::Unauthorized("missing manage_forms capability"));
    }

    Ok(next.run(request).await)
}
