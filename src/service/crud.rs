//! Generic CRUD execution against PostgreSQL.
//!
//! Every call runs on a connection the handler acquired for this request; writes
//! expect the caller to hold a transaction and commit it.

use crate::config::{EntityDef, ListScope};
use crate::error::AppError;
use crate::sql::{insert, select_by_id, select_list, update, PgBindValue, QueryBuf};
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{PgConnection, Postgres, Row};

pub struct CrudService;

impl CrudService {
    /// All rows of the entity in registry order.
    pub async fn list(
        conn: &mut PgConnection,
        schema: &str,
        entity: &EntityDef,
        scope: ListScope,
    ) -> Result<Vec<Value>, AppError> {
        let q = select_list(schema, entity, scope);
        let rows = bind_all(&q).fetch_all(&mut *conn).await?;
        rows.iter().map(row_to_json).collect()
    }

    /// One row by id, or an empty object when no row matches.
    pub async fn get(
        conn: &mut PgConnection,
        schema: &str,
        entity: &EntityDef,
        id: i64,
    ) -> Result<Value, AppError> {
        let q = select_by_id(schema, entity, id);
        let row = bind_all(&q).fetch_optional(&mut *conn).await?;
        match row {
            Some(r) => row_to_json(&r),
            None => Ok(Value::Object(Map::new())),
        }
    }

    /// Insert whitelisted fields of body. Returns the new id.
    pub async fn create(
        conn: &mut PgConnection,
        schema: &str,
        entity: &EntityDef,
        body: &Map<String, Value>,
    ) -> Result<i64, AppError> {
        let q = insert(schema, entity, body);
        let row = bind_all(&q).fetch_one(&mut *conn).await?;
        Ok(row.try_get::<i64, _>("id")?)
    }

    /// Update whitelisted fields of body on the row with id. Returns affected row count.
    pub async fn update(
        conn: &mut PgConnection,
        schema: &str,
        entity: &EntityDef,
        id: i64,
        body: &Map<String, Value>,
    ) -> Result<u64, AppError> {
        let q = update(schema, entity, id, body);
        let result = bind_all(&q).execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }
}

/// Bind every parameter of a built statement.
pub(crate) fn bind_all(q: &QueryBuf) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(PgBindValue::from_json(p));
    }
    query
}

fn row_to_json(row: &PgRow) -> Result<Value, AppError> {
    Ok(row.try_get::<Value, _>("row")?)
}
