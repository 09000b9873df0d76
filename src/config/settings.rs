//! Process configuration, read once at startup and shared through [`crate::AppState`].

use crate::config::validator::is_safe_identifier;
use crate::error::ConfigError;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SCHEMA: &str = "education_center_web";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    /// Schema holding all content tables.
    pub schema: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Create schema and tables on startup.
    pub auto_migrate: bool,
    pub max_body_bytes: usize,
    pub telegram_bot_token: Option<String>,
    pub telegram_api_base: String,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_api_url: String,
    pub email_from_address: String,
    pub email_from_name: String,
    /// Timeout for each outbound notification request.
    pub delivery_timeout: Duration,
}

impl AppConfig {
    /// Load from the process environment, after applying a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let schema = get("DB_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
        if !is_safe_identifier(&schema) {
            return Err(ConfigError::Invalid {
                key: "DB_SCHEMA",
                reason: format!("'{}' is not a plain lower-case identifier", schema),
            });
        }

        Ok(AppConfig {
            database_url,
            schema,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into()),
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5)?,
            auto_migrate: parse_or(&get, "AUTO_MIGRATE", false)?,
            max_body_bytes: parse_or(&get, "MAX_BODY_BYTES", 1024 * 1024)?,
            telegram_bot_token: get("TELEGRAM_BOT_TOKEN"),
            telegram_api_base: get("TELEGRAM_API_BASE")
                .unwrap_or_else(|| "https://api.telegram.org".into()),
            sendgrid_api_key: get("SENDGRID_API_KEY"),
            sendgrid_api_url: get("SENDGRID_API_URL")
                .unwrap_or_else(|| "https://api.sendgrid.com/v3/mail/send".into()),
            email_from_address: get("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|| "noreply@poehali.dev".into()),
            email_from_name: get("EMAIL_FROM_NAME")
                .unwrap_or_else(|| "Образовательный центр".into()),
            delivery_timeout: Duration::from_secs(parse_or(&get, "DELIVERY_TIMEOUT_SECS", 10)?),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let cfg = load(&[("DATABASE_URL", "postgres://localhost/ec")]).unwrap();
        assert_eq!(cfg.schema, DEFAULT_SCHEMA);
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.max_connections, 5);
        assert!(!cfg.auto_migrate);
        assert_eq!(cfg.delivery_timeout, Duration::from_secs(10));
        assert!(cfg.telegram_bot_token.is_none());
        assert!(cfg.sendgrid_api_key.is_none());
    }

    #[test]
    fn database_url_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn blank_credentials_count_as_absent() {
        let cfg = load(&[
            ("DATABASE_URL", "postgres://localhost/ec"),
            ("TELEGRAM_BOT_TOKEN", "  "),
            ("SENDGRID_API_KEY", "SG.key"),
        ])
        .unwrap();
        assert!(cfg.telegram_bot_token.is_none());
        assert_eq!(cfg.sendgrid_api_key.as_deref(), Some("SG.key"));
    }

    #[test]
    fn unparseable_numbers_are_rejected() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/ec"),
            ("DB_MAX_CONNECTIONS", "many"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn schema_must_be_a_plain_identifier() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/ec"),
            ("DB_SCHEMA", "public; drop"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_SCHEMA", .. }));
    }
}
