//! Response bodies and request-body parsing shared by the handlers.

use crate::error::AppError;
use crate::notify::DeliveryResults;
use axum::{body::Bytes, http::StatusCode, Json};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize)]
pub struct Created {
    pub id: i64,
    pub success: bool,
}

#[derive(Serialize)]
pub struct Updated {
    pub success: bool,
    pub updated: u64,
}

#[derive(Serialize)]
pub struct LoginSuccess {
    pub success: bool,
    pub token: String,
    pub username: String,
}

#[derive(Serialize)]
pub struct BookingAccepted {
    pub success: bool,
    pub booking_id: i64,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct DispatchOutcome {
    pub success: bool,
    pub results: DeliveryResults,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// Parse a JSON request body. An empty body reads as `{}`.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        &b"{}"[..]
    } else {
        &body[..]
    };
    serde_json::from_slice(raw).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
}

/// Parse a body that must be a JSON object.
pub fn body_to_map(body: &Bytes) -> Result<Map<String, Value>, AppError> {
    match parse_body::<Value>(body)? {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
