//! Schema bootstrap: creates the schema and every content table if missing.

use crate::config::validator::is_safe_identifier;
use crate::error::{AppError, ConfigError};
use crate::sql::qualified_table;
use sqlx::PgPool;

/// Table name and column definitions. `id`, `created_at` and `updated_at` are added to each.
const TABLES: &[(&str, &str)] = &[
    (
        "teachers",
        "name TEXT, photo_url TEXT, description TEXT, specialization TEXT, experience TEXT, \
         sort_order INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "schedule",
        "time TEXT, title TEXT, description TEXT, teacher_id INTEGER, \
         sort_order INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "calendar_events",
        "date DATE, title TEXT, description TEXT, event_type TEXT, \
         sort_order INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "contacts",
        "type TEXT, value TEXT, icon TEXT, label TEXT, sort_order INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "reviews",
        "author_name TEXT, author_photo TEXT, rating INTEGER, review_text TEXT, date TEXT, \
         is_published BOOLEAN NOT NULL DEFAULT TRUE, sort_order INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "results",
        "title TEXT, description TEXT, image_url TEXT, metric_value NUMERIC, metric_label TEXT, \
         sort_order INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "student_bookings",
        "student_name TEXT NOT NULL, student_phone TEXT NOT NULL, student_email TEXT, \
         selected_teacher TEXT, selected_subject TEXT, selected_time TEXT, \
         status TEXT NOT NULL DEFAULT 'new'",
    ),
    (
        "notification_settings",
        "notification_type TEXT NOT NULL UNIQUE, is_enabled BOOLEAN NOT NULL DEFAULT FALSE, \
         value TEXT",
    ),
    (
        "admins",
        "username TEXT NOT NULL UNIQUE, password_hash TEXT NOT NULL",
    ),
];

/// DDL statements, in execution order, for `schema`.
pub fn schema_ddl(schema: &str) -> Vec<String> {
    let mut out = vec![format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", schema)];
    for (table, columns) in TABLES {
        out.push(format!(
            "CREATE TABLE IF NOT EXISTS {} (\
             id SERIAL PRIMARY KEY, {}, \
             created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP, \
             updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP)",
            qualified_table(schema, table),
            columns
        ));
    }
    out
}

/// Create the schema and tables. Idempotent.
pub async fn ensure_schema(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    if !is_safe_identifier(schema) {
        return Err(ConfigError::Invalid {
            key: "DB_SCHEMA",
            reason: format!("'{}' is not a plain lower-case identifier", schema),
        }
        .into());
    }
    for ddl in schema_ddl(schema) {
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(schema, "schema ready");
    Ok(())
}
