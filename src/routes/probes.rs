//! Liveness, readiness and build info.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
    schema: String,
}

async fn live() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Ready once the database answers and the content schema exists.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let probe = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM pg_namespace WHERE nspname::text = $1)",
    )
    .bind(state.schema())
    .fetch_one(&state.pool)
    .await;

    let (code, status, database) = match probe {
        Ok(true) => (StatusCode::OK, "ok", "ok"),
        Ok(false) => {
            tracing::warn!(schema = state.schema(), "schema missing; run with AUTO_MIGRATE=true");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "schema missing")
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };
    let body = Readiness {
        status,
        database,
        schema: state.schema().to_string(),
    };
    (code, Json(body))
}

async fn build_info() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn probe_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(live))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .route("/info", get(build_info))
        .with_state(state)
}
