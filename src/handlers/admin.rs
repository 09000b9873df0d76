//! Authenticated entity CRUD: `GET/POST/PUT /admin-api?entity=..[&id=..]`.

use crate::config::{lookup, ListScope, Operation};
use crate::error::AppError;
use crate::extractors::AdminToken;
use crate::response::{body_to_map, created, ok, Created, Updated};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntityQuery {
    pub entity: String,
    pub id: Option<String>,
}

impl EntityQuery {
    /// The `id` parameter, if given and non-empty.
    fn id(&self) -> Result<Option<i64>, AppError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("invalid id: {}", raw))),
        }
    }
}

/// List all rows, or fetch one when `id` is given (`{}` if it does not exist).
pub async fn read(
    _auth: AdminToken,
    State(state): State<AppState>,
    query: Result<Query<EntityQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(q) = query?;
    let entity = lookup(&q.entity, Operation::Read)?;
    let id = q.id()?;
    let mut conn = state.pool.acquire().await?;
    let body = match id {
        Some(id) => CrudService::get(&mut conn, state.schema(), entity, id).await?,
        None => Value::Array(CrudService::list(&mut conn, state.schema(), entity, ListScope::Admin).await?),
    };
    Ok(Json(body))
}

pub async fn create(
    _auth: AdminToken,
    State(state): State<AppState>,
    query: Result<Query<EntityQuery>, QueryRejection>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let Query(q) = query?;
    let entity = lookup(&q.entity, Operation::Create)?;
    let fields = body_to_map(&body)?;
    let mut tx = state.pool.begin().await?;
    let id = CrudService::create(&mut tx, state.schema(), entity, &fields).await?;
    tx.commit().await?;
    tracing::info!(entity = entity.name, id, "entity created");
    Ok(created(Created { id, success: true }))
}

/// Update one row. A missing row is reported as `updated: 0`, not an error.
pub async fn update(
    _auth: AdminToken,
    State(state): State<AppState>,
    query: Result<Query<EntityQuery>, QueryRejection>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let Query(q) = query?;
    let entity = lookup(&q.entity, Operation::Update)?;
    let id = q.id()?.ok_or_else(|| AppError::BadRequest("id is required".into()))?;
    let fields = body_to_map(&body)?;
    let mut tx = state.pool.begin().await?;
    let updated = CrudService::update(&mut tx, state.schema(), entity, id, &fields).await?;
    tx.commit().await?;
    tracing::info!(entity = entity.name, id, updated, "entity updated");
    Ok(ok(Updated { success: true, updated }))
}

/// Other methods: authentication is still checked first.
pub async fn method_not_allowed(_auth: AdminToken) -> AppError {
    AppError::MethodNotAllowed
}
