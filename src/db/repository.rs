use chrono::Utc;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::warn;

use crate::models::{Role, User};

/// The locally persisted login: auth token plus the user identity the UI
/// needs to restore its authenticated state after a restart. At most one
/// session exists at a time.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user_id: i64,
    pub token: String,
    pub role: Role,
    pub email: String,
    pub full_name: Option<String>,
    pub logged_in_at: String,
}

#[derive(Debug, FromRow)]
struct SessionRow {
    user_id: i64,
    token: String,
    role: String,
    email: String,
    full_name: Option<String>,
    logged_in_at: String,
}

pub async fn save_session(
    db: &SqlitePool,
    user: &User,
    token: &str,
) -> Result<Session, sqlx::Error> {
    let logged_in_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO session (id, user_id, token, role, email, full_name, logged_in_at)
        VALUES (1, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            user_id = excluded.user_id,
            token = excluded.token,
            role = excluded.role,
            email = excluded.email,
            full_name = excluded.full_name,
            logged_in_at = excluded.logged_in_at
        "#,
    )
    .bind(user.id)
    .bind(token)
    .bind(user.role.as_str())
    .bind(&user.email)
    .bind(&user.full_name)
    .bind(&logged_in_at)
    .execute(db)
    .await?;

    Ok(Session {
        user_id: user.id,
        token: token.to_string(),
        role: user.role,
        email: user.email.clone(),
        full_name: user.full_name.clone(),
        logged_in_at,
    })
}

pub async fn load_session(db: &SqlitePool) -> Result<Option<Session>, sqlx::Error> {
    let row = sqlx::query_as::<_, SessionRow>(
        "SELECT user_id, token, role, email, full_name, logged_in_at FROM session WHERE id = 1",
    )
    .fetch_optional(db)
    .await?;

    Ok(row.and_then(|row| match Role::parse(&row.role) {
        Some(role) => Some(Session {
            user_id: row.user_id,
            token: row.token,
            role,
            email: row.email,
            full_name: row.full_name,
            logged_in_at: row.logged_in_at,
        }),
        None => {
            warn!("Stored session has unknown role '{}', ignoring it", row.role);
            None
        }
    }))
}

pub async fn clear_session(db: &SqlitePool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM session WHERE id = 1")
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
