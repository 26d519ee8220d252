//! Form Builder REST API
//!
//! HTTP surface for the form-builder platform: administrative CRUD over
//! form definitions, plus the public fetch/submit/embed endpoints used by
//! rendered pages.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    FORM BUILDER API                       │
//! │                                                           │
//! │  /form-builder/v1/forms*        admin (bearer token)      │
//! │  /form-builder/v1/forms/:id/public   public fetch         │
//! │  /form-builder/v1/forms/:id/embed    rendered HTML        │
//! │  /form-builder/v1/submit             public submit        │
//! │                                                           │
//! │  editor client ──▶ API ──▶ FormStore (SQLite)             │
//! │  public page  ──▶ renderer ──▶ submission handler ──▶ API │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use formbuilder_core::FormStore;

pub use config::Config;
pub use models::*;

/// Shared application state, passed explicitly to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: FormStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: FormStore, config: Config) -> Self {
        Self { store, config: Arc::new(config) }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Form Builder API",
        version = "1.0.0",
        description = "REST API for composing data-collection forms and capturing submissions",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::forms::list_forms,
        routes::forms::get_form,
        routes::forms::create_form,
        routes::forms::update_form,
        routes::forms::delete_form,
        routes::forms::list_submissions,
        routes::public::get_form_public,
        routes::public::embed_form,
        routes::public::submit_form,
    ),
    components(
        schemas(ErrorResponse, SavedForm)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forms", description = "Form definition management"),
        (name = "public", description = "Public form rendering and submission")
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by the admin endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/form-builder/v1", routes::api_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
