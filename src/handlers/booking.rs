//! Booking form submission: `POST /submit-booking`.
//!
//! Notifications are a separate call to `/send-notification`.

use crate::error::AppError;
use crate::response::{created, parse_body, BookingAccepted};
use crate::service::{BookingForm, BookingService, RequestValidator};
use crate::state::AppState;
use axum::{body::Bytes, extract::State, response::IntoResponse};

pub async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let form: BookingForm = parse_body(&body)?;
    RequestValidator::require_non_empty(
        &[form.student_name.as_str(), form.student_phone.as_str()],
        "Student name and phone are required",
    )?;

    let mut tx = state.pool.begin().await?;
    let booking_id = BookingService::submit(&mut tx, state.schema(), &form).await?;
    tx.commit().await?;
    tracing::info!(booking_id, "booking submitted");

    Ok(created(BookingAccepted {
        success: true,
        booking_id,
        message: "Заявка успешно отправлена",
    }))
}
