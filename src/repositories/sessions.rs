use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::session::Session;

pub async fn insert_session(pool: &PgPool, session: &Session) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sessions (id, user_id, last_token_hash, initiated_at, expires_at, revoked) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&session.id)
    .bind(&session.user_id)
    .bind(&session.last_token_hash)
    .bind(session.initiated_at)
    .bind(session.expires_at)
    .bind(session.revoked)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn find_session_by_id(
    pool: &PgPool,
    session_id: &str,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        "SELECT id, user_id, last_token_hash, initiated_at, expires_at, revoked \
         FROM sessions WHERE id = $1",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

/// Records a rotation: the new token's fingerprint replaces the old one and
/// the session's life is extended.
pub async fn rotate_session(
    pool: &PgPool,
    session_id: &str,
    new_token_hash: &str,
    new_expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sessions SET last_token_hash = $1, expires_at = $2 WHERE id = $3")
        .bind(new_token_hash)
        .bind(new_expires_at)
        .bind(session_id)
        .execute(pool)
        .await
        .map(|_| ())
}

pub async fn revoke_session(pool: &PgPool, session_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sessions SET revoked = TRUE WHERE id = $1")
        .bind(session_id)
        .execute(pool)
        .await
        .map(|_| ())
}

/// Deletes sessions that can never validate again. Returns how many rows
/// went away.
pub async fn delete_dead_sessions(pool: &PgPool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE revoked = TRUE OR expires_at <= $1")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
