//! Router assembly. Every endpoint carries its own CORS policy, and `OPTIONS`
//! is answered with 200 before any auth check.

mod entity;
mod probes;
mod site;

pub use probes::probe_routes;
pub use entity::{admin_routes, public_routes};
pub use site::{auth_routes, booking_routes, notification_routes};

use crate::state::AppState;
use axum::{
    http::{header::CONTENT_TYPE, HeaderName, Method},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86400);

pub(crate) fn cors(methods: &[Method], with_auth_header: bool) -> CorsLayer {
    let mut headers = vec![CONTENT_TYPE];
    if with_auth_header {
        headers.push(HeaderName::from_static("x-auth-token"));
    }
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods.to_vec())
        .allow_headers(headers)
        .max_age(PREFLIGHT_MAX_AGE)
}

/// All endpoints with request tracing and the configured body size limit.
pub fn app(state: AppState) -> Router {
    let max_body = state.config.max_body_bytes;
    Router::new()
        .merge(probe_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .merge(public_routes(state.clone()))
        .merge(auth_routes(state.clone()))
        .merge(booking_routes(state.clone()))
        .merge(notification_routes(state))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TraceLayer::new_for_http())
}
