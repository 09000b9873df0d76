//! Entity routes: authenticated admin CRUD and the public read API.

use super::cors;
use crate::handlers::{admin, method_not_allowed, preflight, public};
use crate::state::AppState;
use axum::{http::Method, routing::get, Router};

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/admin-api",
            get(admin::read)
                .post(admin::create)
                .put(admin::update)
                .options(preflight)
                .fallback(admin::method_not_allowed),
        )
        .layer(cors(
            &[Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS],
            true,
        ))
        .with_state(state)
}

pub fn public_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/public-api",
            get(public::list)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors(&[Method::GET, Method::OPTIONS], false))
        .with_state(state)
}
