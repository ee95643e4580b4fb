pub mod analysis;
pub mod api;
pub mod clock;
pub mod config;
pub mod core_state;
pub mod models;
pub mod navigation;
pub mod records;
pub mod reminders;
pub mod session;
pub mod store;
pub mod timeline;
pub mod upload;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Initialize logging, build the demo application state, and serve the
/// API until the process is stopped.
pub async fn run() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let core = Arc::new(core_state::CoreState::demo());
    let app = api::app_router(core)
        .layer(TraceLayer::new_for_http())
        // The browser UI is served separately in development.
        .layer(CorsLayer::permissive());

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await
}
