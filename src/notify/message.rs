//! Notification text for a new booking.

use crate::service::scalar_string;
use serde::Deserialize;

/// Booking fields the caller passes along with a dispatch request.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookingSnapshot {
    #[serde(deserialize_with = "scalar_string")]
    pub student_name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub student_phone: String,
    #[serde(deserialize_with = "scalar_string")]
    pub selected_subject: String,
    #[serde(deserialize_with = "scalar_string")]
    pub selected_time: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingMessage {
    pub student_name: String,
    /// Telegram-flavoured HTML (`<b>` tags).
    pub text: String,
}

impl BookingMessage {
    pub fn from_booking(booking: &BookingSnapshot) -> Self {
        let text = format!(
            "\n<b>🔔 Новая заявка на занятие!</b>\n\n\
             👤 <b>Ученик:</b> {}\n\
             📞 <b>Телефон:</b> {}\n\
             📚 <b>Предмет:</b> {}\n\
             🕐 <b>Время:</b> {}\n",
            escape_html(&booking.student_name),
            escape_html(&booking.student_phone),
            escape_html(&booking.selected_subject),
            escape_html(&booking.selected_time),
        );
        BookingMessage {
            student_name: booking.student_name.clone(),
            text,
        }
    }

    pub fn subject(&self) -> String {
        format!("Новая заявка от {}", self.student_name)
    }

    /// Full HTML document for email clients, which expect `<strong>`.
    pub fn email_html(&self) -> String {
        let body = self.text.replace("<b>", "<strong>").replace("</b>", "</strong>");
        format!("<html><body>{}</body></html>", body)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
