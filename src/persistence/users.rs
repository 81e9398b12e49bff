//! User persistence: lookup and insert.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Row returned from DB (username is stored lowercase). The password column is
/// plain text by design; hardening is out of scope for this service.
#[derive(FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

/// List all users, for hydration.
pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, UserRow>("SELECT id, username, password FROM users")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a user. Username must already be lowercase.
pub async fn insert_user(
    pool: &PgPool,
    id: Uuid,
    username: &str,
    password: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO users (id, username, password) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(username)
        .bind(password)
        .execute(pool)
        .await?;
    Ok(())
}
