use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Path the storefront app proxy forwards questionnaire requests to
pub const RECOMMEND_PATH: &str = "/apps/jb-reco";

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::liveness))
        .route("/health", get(handlers::health_check))
        // Recommendations
        .route(RECOMMEND_PATH, get(handlers::recommend))
        // Troubleshooting
        .route("/debug", get(handlers::debug_catalog))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}
