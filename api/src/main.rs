//! Form Builder API server binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formbuilder_api::{build_router, AppState, Config};
use formbuilder_core::FormStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let store = FormStore::connect(&config.database_url)
        .await
        .expect("database connection failed");
    store.init_schema().await.expect("schema setup failed");

    let addr = config.bind_addr.clone();
    let app = build_router(AppState::new(store, config));

    tracing::info!("Form Builder API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind failed");
    axum::serve(listener, app).await.expect("server error");
}
