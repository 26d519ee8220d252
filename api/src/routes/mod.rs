//! API Routes

pub mod forms;
pub mod health;
pub mod public;

use axum::middleware;
use axum::Router;

use crate::{auth, AppState};

/// Routes under the `/form-builder/v1` namespace.
pub fn api_routes(state: AppState) -> Router<AppState> {
    let admin = forms::router()
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin));

    Router::new().merge(admin).merge(public::router())
}
