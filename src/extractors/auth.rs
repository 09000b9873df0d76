//! Admin token extraction from the `X-Auth-Token` header.
//!
//! Tokens are only checked for the `admin_` prefix; they are not looked up or
//! signed. Existing admin clients depend on this format.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

pub const TOKEN_PREFIX: &str = "admin_";

/// Token handed out by the login endpoint.
pub fn mint_token(admin_id: i64, username: &str) -> String {
    format!("{}{}_{}", TOKEN_PREFIX, admin_id, username)
}

pub fn is_admin_token(value: &str) -> bool {
    value.starts_with(TOKEN_PREFIX)
}

/// Extractor that admits callers presenting an admin token; rejects with 401 otherwise.
#[derive(Clone, Debug)]
pub struct AdminToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AdminToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !is_admin_token(value) {
            return Err(AppError::Unauthorized);
        }
        Ok(AdminToken(value.to_string()))
    }
}
