//! Notification fan-out: `POST /send-notification` with `{booking, settings}`.
//!
//! Settings come from the caller, not from storage. Delivery failures only show
//! up as `false` in `results`.

use crate::error::AppError;
use crate::notify::{BookingSnapshot, NotificationSettings};
use crate::response::{ok, parse_body, DispatchOutcome};
use crate::state::AppState;
use axum::{body::Bytes, extract::State, response::IntoResponse};
use serde::Deserialize;

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct DispatchRequest {
    pub booking: BookingSnapshot,
    pub settings: NotificationSettings,
}

pub async fn send(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let req: DispatchRequest = parse_body(&body)?;
    let results = state.dispatcher.dispatch(&req.booking, &req.settings).await;
    Ok(ok(DispatchOutcome {
        success: true,
        results,
    }))
}
