//! Admin login: `POST /auth` with `{username, password}`.

use crate::error::AppError;
use crate::extractors::auth::mint_token;
use crate::response::{ok, parse_body, LoginSuccess};
use crate::service::{scalar_string, CredentialService, RequestValidator};
use crate::state::AppState;
use axum::{body::Bytes, extract::State, response::IntoResponse};
use serde::Deserialize;

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "scalar_string")]
    pub username: String,
    #[serde(deserialize_with = "scalar_string")]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let req: LoginRequest = parse_body(&body)?;
    RequestValidator::require_non_empty(
        &[req.username.as_str(), req.password.as_str()],
        "Username and password required",
    )?;

    let mut conn = state.pool.acquire().await?;
    let admin = CredentialService::find_admin(&mut conn, state.schema(), &req.username, &req.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;
    tracing::info!(admin_id = admin.id, username = %admin.username, "admin logged in");

    Ok(ok(LoginSuccess {
        success: true,
        token: mint_token(admin.id, &admin.username),
        username: admin.username,
    }))
}
