//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    appeal_review_handler, audit_appeal_handler, audit_review_handler, create_reply_handler,
    create_review_handler, get_reply_handler, get_review_handler, health_handler,
    list_user_reviews_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let state = AppState { deps };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/v1/reviews", post(create_review_handler))
        .route("/v1/reviews/:review_id", get(get_review_handler))
        .route(
            "/v1/reviews/:review_id/reply",
            post(create_reply_handler).get(get_reply_handler),
        )
        .route("/v1/reviews/:review_id/audit", post(audit_review_handler))
        .route("/v1/reviews/:review_id/appeal", post(appeal_review_handler))
        .route(
            "/v1/reviews/:review_id/appeal/audit",
            post(audit_appeal_handler),
        )
        .route("/v1/users/:user_id/reviews", get(list_user_reviews_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
