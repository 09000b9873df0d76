//! Booking submissions from the public site.

use crate::error::AppError;
use crate::service::crud::bind_all;
use crate::service::validation::scalar_string;
use crate::sql::insert_booking;
use serde::Deserialize;
use sqlx::{PgConnection, Row};

/// Status every new booking starts in.
pub const INITIAL_STATUS: &str = "new";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    #[serde(deserialize_with = "scalar_string")]
    pub student_name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub student_phone: String,
    #[serde(deserialize_with = "scalar_string")]
    pub student_email: String,
    #[serde(deserialize_with = "scalar_string")]
    pub selected_teacher: String,
    #[serde(deserialize_with = "scalar_string")]
    pub selected_subject: String,
    #[serde(deserialize_with = "scalar_string")]
    pub selected_time: String,
}

pub struct BookingService;

impl BookingService {
    /// Insert the booking with status `new`. Returns its id.
    pub async fn submit(
        conn: &mut PgConnection,
        schema: &str,
        form: &BookingForm,
    ) -> Result<i64, AppError> {
        let q = insert_booking(
            schema,
            [
                form.student_name.as_str(),
                form.student_phone.as_str(),
                form.student_email.as_str(),
                form.selected_teacher.as_str(),
                form.selected_subject.as_str(),
                form.selected_time.as_str(),
                INITIAL_STATUS,
            ],
        );
        let row = bind_all(&q).fetch_one(&mut *conn).await?;
        Ok(row.try_get::<i64, _>("id")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_accepts_numeric_phone_and_null_fields() {
        let form: BookingForm = serde_json::from_value(json!({
            "student_name": "Ivan",
            "student_phone": 79001234567_i64,
            "student_email": null
        }))
        .unwrap();
        assert_eq!(form.student_phone, "79001234567");
        assert_eq!(form.student_email, "");
        assert_eq!(form.selected_time, "");
    }
}
