//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::notify::Dispatcher;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Each request acquires its own connection and returns it before responding.
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig, dispatcher: Dispatcher) -> Self {
        AppState {
            pool,
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn schema(&self) -> &str {
        &self.config.schema
    }
}
