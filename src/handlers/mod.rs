//! HTTP handlers, one module per endpoint.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod notification;
pub mod public;

use crate::error::AppError;
use axum::http::StatusCode;

/// OPTIONS without CORS request headers. Never authenticated.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for methods a route does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
