//! Telegram Bot API delivery.

use super::{BookingMessage, DeliveryChannel, DeliveryError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

pub struct TelegramChannel {
    http: reqwest::Client,
    api_base: String,
    bot_token: Option<String>,
}

impl TelegramChannel {
    pub fn new(http: reqwest::Client, api_base: String, bot_token: Option<String>) -> Self {
        TelegramChannel {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token,
        }
    }

    fn endpoint(&self, token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, token)
    }
}

#[async_trait]
impl DeliveryChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn deliver(&self, target: &str, message: &BookingMessage) -> Result<(), DeliveryError> {
        let token = self
            .bot_token
            .as_deref()
            .ok_or(DeliveryError::MissingCredentials("TELEGRAM_BOT_TOKEN"))?;
        let resp = self
            .http
            .post(self.endpoint(token))
            .json(&SendMessage {
                chat_id: target,
                text: &message.text,
                parse_mode: "HTML",
            })
            .send()
            .await?;
        if resp.status() != StatusCode::OK {
            return Err(DeliveryError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}
