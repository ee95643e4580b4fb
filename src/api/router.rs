//! Application router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. Auth pages and the health probe are
//! public; everything else goes through the bearer-token middleware.
//!
//! Handlers use `State<ApiContext>`; the middleware uses
//! `Extension<ApiContext>` (injected as the outermost layer) so it can
//! resolve sessions before the handler runs.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the application router.
pub fn app_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    // Protected routes: one per signed-in view.
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/dashboard", get(endpoints::dashboard::view))
        .route("/records", get(endpoints::records::list))
        .route(
            "/records/:id",
            get(endpoints::records::detail).delete(endpoints::records::remove),
        )
        .route("/records/upload", post(endpoints::upload::start))
        .route("/uploads/:id", get(endpoints::upload::status))
        .route("/uploads/:id/reset", post(endpoints::upload::reset))
        .route("/timeline", get(endpoints::timeline::list))
        .route("/reminders", get(endpoints::reminders::list))
        .route("/analysis", get(endpoints::analysis::view))
        .route("/share/link", post(endpoints::share::generate))
        .route("/auth/logout", post(endpoints::auth::logout))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so the middleware can extract ApiContext.
        .layer(axum::Extension(ctx.clone()));

    // Unprotected routes: reachable without a session.
    let unprotected = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/auth/signup", post(endpoints::auth::signup))
        .route("/auth/forgot-password", post(endpoints::auth::forgot_password))
        .with_state(ctx.clone())
        .layer(axum::Extension(ctx));

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
}
