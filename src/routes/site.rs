//! Login, booking, and notification routes.

use super::cors;
use crate::handlers::{auth, booking, method_not_allowed, notification, preflight};
use crate::state::AppState;
use axum::{http::Method, routing::post, Router};

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth", post(auth::login).options(preflight).fallback(method_not_allowed))
        .layer(cors(&[Method::POST, Method::OPTIONS], true))
        .with_state(state)
}

pub fn booking_routes(state: AppState) -> Router {
    Router::new()
        .route("/submit-booking", post(booking::submit).options(preflight).fallback(method_not_allowed))
        .layer(cors(&[Method::POST, Method::OPTIONS], false))
        .with_state(state)
}

pub fn notification_routes(state: AppState) -> Router {
    Router::new()
        .route("/send-notification", post(notification::send).options(preflight).fallback(method_not_allowed))
        .layer(cors(&[Method::POST, Method::OPTIONS], false))
        .with_state(state)
}
