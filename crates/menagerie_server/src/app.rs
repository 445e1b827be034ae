//! Application assembly.

use std::path::Path;

use axum::middleware::from_fn;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use crate::config::HomePage;
use crate::middleware::{log_request, MethodOverrideLayer};
use crate::routes;
use crate::state::AppState;

/// Builds the full request pipeline.
///
/// Order, outermost first: request logging, method override, routing,
/// static files for anything no route matched.
pub fn build_app(state: AppState, static_dir: impl AsRef<Path>, home_page: HomePage) -> Router {
    let routed = routes::router(home_page)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .with_state(state);

    let pipeline = ServiceBuilder::new()
        .layer(from_fn(log_request))
        .layer(MethodOverrideLayer::new())
        .service(routed);

    Router::new().fallback_service(pipeline)
}
