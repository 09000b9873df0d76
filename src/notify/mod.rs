//! Booking notifications: message formatting and fan-out to delivery channels.
//!
//! Each enabled channel is attempted at most once. A failed delivery is logged and
//! reported as `false`; it never fails the request or blocks the other channel.

pub mod email;
pub mod message;
pub mod telegram;

use crate::config::AppConfig;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

pub use email::EmailChannel;
pub use message::{BookingMessage, BookingSnapshot};
pub use telegram::TelegramChannel;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("missing credential: {0}")]
    MissingCredentials(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
}

/// An outbound notification provider.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Deliver `message` to `target` (chat id, email address, ...).
    async fn deliver(&self, target: &str, message: &BookingMessage) -> Result<(), DeliveryError>;
}

/// Per-channel switch and destination as sent by the caller.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChannelSetting {
    #[serde(deserialize_with = "truthy")]
    pub enabled: bool,
    /// Chat id or address. Chat ids may arrive as numbers.
    pub value: Option<Value>,
}

/// Loose flag: `1`, `"yes"` and `true` all switch a channel on; `0`, `""`,
/// `false` and `null` leave it off.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

impl ChannelSetting {
    /// Destination to deliver to, if the channel is enabled and has one.
    pub fn target(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        match self.value.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub telegram: ChannelSetting,
    pub email: ChannelSetting,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryResults {
    pub telegram: bool,
    pub email: bool,
}

pub struct Dispatcher {
    telegram: Arc<dyn DeliveryChannel>,
    email: Arc<dyn DeliveryChannel>,
}

impl Dispatcher {
    pub fn new(telegram: Arc<dyn DeliveryChannel>, email: Arc<dyn DeliveryChannel>) -> Self {
        Dispatcher { telegram, email }
    }

    /// Telegram and SendGrid channels sharing one HTTP client with the configured timeout.
    pub fn from_config(config: &AppConfig) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(config.delivery_timeout)
            .build()?;
        let telegram = TelegramChannel::new(
            http.clone(),
            config.telegram_api_base.clone(),
            config.telegram_bot_token.clone(),
        );
        let email = EmailChannel::new(
            http,
            config.sendgrid_api_url.clone(),
            config.sendgrid_api_key.clone(),
            config.email_from_address.clone(),
            config.email_from_name.clone(),
        );
        Ok(Dispatcher::new(Arc::new(telegram), Arc::new(email)))
    }

    pub async fn dispatch(
        &self,
        booking: &BookingSnapshot,
        settings: &NotificationSettings,
    ) -> DeliveryResults {
        let message = BookingMessage::from_booking(booking);
        let mut results = DeliveryResults::default();
        if let Some(target) = settings.telegram.target() {
            results.telegram = attempt(self.telegram.as_ref(), &target, &message).await;
        }
        if let Some(target) = settings.email.target() {
            results.email = attempt(self.email.as_ref(), &target, &message).await;
        }
        tracing::info!(telegram = results.telegram, email = results.email, "notification dispatch finished");
        results
    }
}

async fn attempt(channel: &dyn DeliveryChannel, target: &str, message: &BookingMessage) -> bool {
    match channel.deliver(target, message).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(channel = channel.name(), error = %e, "notification delivery failed");
            false
        }
    }
}
