//! Education center API server.
//!
//! Run from repo root: `cargo run -p education-center-server`

use education_center_api::{app, ensure_schema, validate, AppConfig, AppState, Dispatcher, ENTITIES};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("education_center_api=info,tower_http=info")
            }),
        )
        .init();

    validate(ENTITIES)?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    if config.auto_migrate {
        ensure_schema(&pool, &config.schema).await?;
    }

    let dispatcher = Dispatcher::from_config(&config)?;
    if config.telegram_bot_token.is_none() {
        tracing::warn!("TELEGRAM_BOT_TOKEN not set, telegram notifications will be skipped");
    }
    if config.sendgrid_api_key.is_none() {
        tracing::warn!("SENDGRID_API_KEY not set, email notifications will be skipped");
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(pool, config, dispatcher);
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}
