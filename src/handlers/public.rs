//! Unauthenticated listings for the public site: `GET /public-api?entity=..`.

use crate::config::{lookup, ListScope, Operation};
use crate::error::AppError;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PublicQuery {
    pub entity: String,
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PublicQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, AppError> {
    let Query(q) = query?;
    let entity = lookup(&q.entity, Operation::PublicList)?;
    let mut conn = state.pool.acquire().await?;
    let rows = CrudService::list(&mut conn, state.schema(), entity, ListScope::Public).await?;
    Ok(Json(rows))
}
