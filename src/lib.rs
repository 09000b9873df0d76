//! Education center backend: content CRUD for the admin panel, a public read
//! API, admin login, booking submission, and booking notifications over
//! Telegram and email. PostgreSQL via sqlx, HTTP via axum.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod notify;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::{lookup, validate, AppConfig, EntityDef, Operation, ENTITIES};
pub use error::{AppError, ConfigError};
pub use migration::ensure_schema;
pub use notify::{DeliveryChannel, DeliveryError, Dispatcher};
pub use routes::app;
pub use state::AppState;
