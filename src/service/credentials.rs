//! Admin credential lookup.

use crate::error::AppError;
use crate::service::crud::bind_all;
use crate::sql::select_admin;
use sqlx::{PgConnection, Row};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminIdentity {
    pub id: i64,
    pub username: String,
}

pub struct CredentialService;

impl CredentialService {
    /// Find the admin whose username and stored password value both match.
    pub async fn find_admin(
        conn: &mut PgConnection,
        schema: &str,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminIdentity>, AppError> {
        let q = select_admin(schema, username, password);
        let row = bind_all(&q).fetch_optional(&mut *conn).await?;
        row.map(|r| -> Result<AdminIdentity, AppError> {
            Ok(AdminIdentity {
                id: r.try_get("id")?,
                username: r.try_get("username")?,
            })
        })
        .transpose()
    }
}
