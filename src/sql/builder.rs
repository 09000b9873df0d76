//! Builds parameterized SELECT, INSERT and UPDATE statements from registry entries.

use crate::config::{EntityDef, ListScope, ADMINS_TABLE, BOOKINGS_TABLE};
use serde_json::{Map, Value};

/// Quote identifier for PostgreSQL (safe: only from the registry or validated config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Each row comes back as one JSON object so timestamps and numerics are
/// normalised by the database.
const ROW_PROJECTION: &str = "row_to_json(t) AS \"row\"";

/// SELECT all rows in registry order. Public listings skip rows whose
/// `public_requires` column is null.
pub fn select_list(schema: &str, entity: &EntityDef, scope: ListScope) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, entity.table);
    let where_clause = match (scope, entity.public_requires) {
        (ListScope::Public, Some(col)) => format!(" WHERE t.{} IS NOT NULL", quoted(col)),
        _ => String::new(),
    };
    q.sql = format!(
        "SELECT {} FROM {} t{} ORDER BY t.{} {}",
        ROW_PROJECTION,
        table,
        where_clause,
        quoted(entity.order_by.column),
        entity.order_by.direction.as_sql()
    );
    q
}

/// SELECT one row by id.
pub fn select_by_id(schema: &str, entity: &EntityDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, entity.table);
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "SELECT {} FROM {} t WHERE t.{} = ${}::bigint",
        ROW_PROJECTION,
        table,
        quoted("id"),
        n
    );
    q
}

/// INSERT whitelisted fields present in body, in whitelist order. Other keys are dropped.
pub fn insert(schema: &str, entity: &EntityDef, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, entity.table);
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for f in entity.fields {
        let Some(v) = body.get(f.name) else { continue };
        let n = q.push_param(v.clone());
        cols.push(quoted(f.name));
        placeholders.push(format!("${}::{}", n, f.sql_type));
    }
    let values = if cols.is_empty() {
        "DEFAULT VALUES".to_string()
    } else {
        format!("({}) VALUES ({})", cols.join(", "), placeholders.join(", "))
    };
    q.sql = format!(
        "INSERT INTO {} {} RETURNING {}::bigint AS {}",
        table,
        values,
        quoted("id"),
        quoted("id")
    );
    q
}

/// UPDATE by id: SET whitelisted fields present in body and stamp `updated_at`.
pub fn update(schema: &str, entity: &EntityDef, id: i64, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, entity.table);
    let mut sets = Vec::new();
    for f in entity.fields {
        let Some(v) = body.get(f.name) else { continue };
        let n = q.push_param(v.clone());
        sets.push(format!("{} = ${}::{}", quoted(f.name), n, f.sql_type));
    }
    sets.push(format!("{} = CURRENT_TIMESTAMP", quoted("updated_at")));
    let id_param = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}::bigint",
        table,
        sets.join(", "),
        quoted("id"),
        id_param
    );
    q
}

/// Credential lookup by exact username and stored password value.
pub fn select_admin(schema: &str, username: &str, password: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, ADMINS_TABLE);
    let u = q.push_param(Value::from(username));
    let p = q.push_param(Value::from(password));
    q.sql = format!(
        "SELECT {}::bigint AS {}, {} FROM {} WHERE {} = ${} AND {} = ${} LIMIT 1",
        quoted("id"),
        quoted("id"),
        quoted("username"),
        table,
        quoted("username"),
        u,
        quoted("password_hash"),
        p
    );
    q
}

/// Booking columns written by the public booking form, in bind order.
pub const BOOKING_COLUMNS: &[&str] = &[
    "student_name",
    "student_phone",
    "student_email",
    "selected_teacher",
    "selected_subject",
    "selected_time",
    "status",
];

/// INSERT a booking; `values` follow [`BOOKING_COLUMNS`].
pub fn insert_booking(schema: &str, values: [&str; 7]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, BOOKINGS_TABLE);
    let placeholders: Vec<String> = values
        .iter()
        .map(|v| format!("${}", q.push_param(Value::from(*v))))
        .collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}::bigint AS {}",
        table,
        BOOKING_COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", "),
        placeholders.join(", "),
        quoted("id"),
        quoted("id")
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{lookup, Operation};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn body(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn list_orders_by_id_by_default() {
        let e = lookup("contacts", Operation::Read).unwrap();
        let q = select_list("ec", e, ListScope::Admin);
        assert_eq!(
            q.sql,
            r#"SELECT row_to_json(t) AS "row" FROM "ec"."contacts" t ORDER BY t."id" ASC"#
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn bookings_newest_first_and_settings_by_type() {
        let bookings = select_list("ec", lookup("bookings", Operation::Read).unwrap(), ListScope::Admin);
        assert!(bookings.sql.ends_with(r#"FROM "ec"."student_bookings" t ORDER BY t."created_at" DESC"#));
        let settings = select_list("ec", lookup("notifications", Operation::Read).unwrap(), ListScope::Admin);
        assert!(settings.sql.ends_with(r#"ORDER BY t."notification_type" ASC"#));
    }

    #[test]
    fn public_teachers_skip_unnamed_rows() {
        let e = lookup("teachers", Operation::PublicList).unwrap();
        let public = select_list("ec", e, ListScope::Public);
        assert!(public.sql.contains(r#"WHERE t."name" IS NOT NULL ORDER BY t."id" ASC"#));
        let admin = select_list("ec", e, ListScope::Admin);
        assert!(!admin.sql.contains("WHERE"));
    }

    #[test]
    fn select_by_id_binds_id() {
        let e = lookup("reviews", Operation::Read).unwrap();
        let q = select_by_id("ec", e, 7);
        assert_eq!(q.sql, r#"SELECT row_to_json(t) AS "row" FROM "ec"."reviews" t WHERE t."id" = $1::bigint"#);
        assert_eq!(q.params, vec![json!(7)]);
    }

    #[test]
    fn insert_keeps_only_whitelisted_fields_in_whitelist_order() {
        let e = lookup("teachers", Operation::Create).unwrap();
        let q = insert(
            "ec",
            e,
            &body(json!({"sort_order": 2, "name": "Anna", "id": 99, "is_admin": true})),
        );
        assert_eq!(
            q.sql,
            r#"INSERT INTO "ec"."teachers" ("name", "sort_order") VALUES ($1::text, $2::integer) RETURNING "id"::bigint AS "id""#
        );
        assert_eq!(q.params, vec![json!("Anna"), json!(2)]);
    }

    #[test]
    fn insert_without_known_fields_uses_defaults() {
        let e = lookup("results", Operation::Create).unwrap();
        let q = insert("ec", e, &body(json!({"bogus": 1})));
        assert_eq!(q.sql, r#"INSERT INTO "ec"."results" DEFAULT VALUES RETURNING "id"::bigint AS "id""#);
        assert!(q.params.is_empty());
    }

    #[test]
    fn update_stamps_updated_at_and_binds_id_last() {
        let e = lookup("notifications", Operation::Update).unwrap();
        let q = update("ec", e, 3, &body(json!({"value": "42", "is_enabled": true, "id": 3})));
        assert_eq!(
            q.sql,
            r#"UPDATE "ec"."notification_settings" SET "is_enabled" = $1::boolean, "value" = $2::text, "updated_at" = CURRENT_TIMESTAMP WHERE "id" = $3::bigint"#
        );
        assert_eq!(q.params, vec![json!(true), json!("42"), json!(3)]);
    }

    #[test]
    fn update_with_empty_body_only_stamps() {
        let e = lookup("calendar", Operation::Update).unwrap();
        let q = update("ec", e, 1, &Map::new());
        assert_eq!(
            q.sql,
            r#"UPDATE "ec"."calendar_events" SET "updated_at" = CURRENT_TIMESTAMP WHERE "id" = $1::bigint"#
        );
    }

    #[test]
    fn admin_lookup_binds_username_and_password() {
        let q = select_admin("ec", "alice", "secret");
        assert!(q.sql.contains(r#"FROM "ec"."admins" WHERE "username" = $1 AND "password_hash" = $2"#));
        assert_eq!(q.params, vec![json!("alice"), json!("secret")]);
    }

    #[test]
    fn booking_insert_binds_every_column() {
        let q = insert_booking("ec", ["Ivan", "+7900", "", "", "Math", "10:00", "new"]);
        assert!(q.sql.starts_with(r#"INSERT INTO "ec"."student_bookings" ("student_name", "student_phone""#));
        assert!(q.sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7)"));
        assert_eq!(q.params.last(), Some(&json!("new")));
    }
}
