//! Email delivery through the SendGrid v3 mail API.

use super::{BookingMessage, DeliveryChannel, DeliveryError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

pub struct EmailChannel {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from_address: String,
    from_name: String,
}

impl EmailChannel {
    pub fn new(
        http: reqwest::Client,
        api_url: String,
        api_key: Option<String>,
        from_address: String,
        from_name: String,
    ) -> Self {
        EmailChannel {
            http,
            api_url,
            api_key,
            from_address,
            from_name,
        }
    }

    fn payload(&self, to: &str, message: &BookingMessage) -> Value {
        json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_address, "name": self.from_name },
            "subject": message.subject(),
            "content": [{ "type": "text/html", "value": message.email_html() }]
        })
    }
}

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, target: &str, message: &BookingMessage) -> Result<(), DeliveryError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(DeliveryError::MissingCredentials("SENDGRID_API_KEY"))?;
        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(key)
            .json(&self.payload(target, message))
            .send()
            .await?;
        // SendGrid answers 202 Accepted on success.
        if resp.status() != StatusCode::ACCEPTED {
            return Err(DeliveryError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}
