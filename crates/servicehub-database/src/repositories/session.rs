//! Session repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use servicehub_core::error::AppError;
use servicehub_core::result::AppResult;
use servicehub_core::types::id::{SessionId, UserId};
use servicehub_entity::session::{Session, SessionRow};

use super::bounded;
use crate::store::SessionStore;

const SESSION_COLUMNS: &str = "id, user_id, jti, active, created_at, updated_at, expires_at";

/// PostgreSQL-backed [`SessionStore`].
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
    timeout: Duration,
}

impl SessionRepository {
    /// Create a new session repository whose queries are bounded by `timeout`.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn insert(&self, session: &Session) -> AppResult<()> {
        let row = session.to_row();
        bounded(
            self.timeout,
            "Failed to insert session",
            sqlx::query(
                "INSERT INTO sessions (id, user_id, jti, active, created_at, updated_at, expires_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(row.id)
            .bind(row.user_id)
            .bind(&row.jti)
            .bind(row.active)
            .bind(row.created_at)
            .bind(row.updated_at)
            .bind(row.expires_at)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn update(&self, session: &Session) -> AppResult<()> {
        let result = bounded(
            self.timeout,
            "Failed to update session",
            sqlx::query("UPDATE sessions SET active = $2, jti = $3, updated_at = $4 WHERE id = $1")
                .bind(session.id())
                .bind(session.is_active())
                .bind(session.jti())
                .bind(session.updated_at())
                .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("session not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SessionId) -> AppResult<Option<Session>> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1");
        let row = bounded(
            self.timeout,
            "Failed to find session by id",
            sqlx::query_as::<_, SessionRow>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Session::from_row))
    }

    async fn find_active_by_user(&self, user_id: UserId) -> AppResult<Option<Session>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = $1 AND active = TRUE ORDER BY created_at DESC LIMIT 1"
        );
        let row = bounded(
            self.timeout,
            "Failed to find active session",
            sqlx::query_as::<_, SessionRow>(&sql)
                .bind(user_id)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Session::from_row))
    }

    async fn find_by_jti(&self, jti: &str) -> AppResult<Option<Session>> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE jti = $1");
        let row = bounded(
            self.timeout,
            "Failed to find session by jti",
            sqlx::query_as::<_, SessionRow>(&sql)
                .bind(jti)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Session::from_row))
    }

    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Session>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows = bounded(
            self.timeout,
            "Failed to list user sessions",
            sqlx::query_as::<_, SessionRow>(&sql)
                .bind(user_id)
                .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.into_iter().map(Session::from_row).collect())
    }

    async fn deactivate_all(&self, user_id: UserId) -> AppResult<u64> {
        let result = bounded(
            self.timeout,
            "Failed to deactivate user sessions",
            sqlx::query(
                "UPDATE sessions SET active = FALSE, updated_at = NOW() \
                 WHERE user_id = $1 AND active = TRUE",
            )
            .bind(user_id)
            .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected())
    }
}
