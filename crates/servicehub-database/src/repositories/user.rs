//! User repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use servicehub_core::result::AppResult;
use servicehub_core::types::id::UserId;
use servicehub_entity::user::{Professional, User, UserRow};

use super::bounded;
use crate::store::UserStore;

const USER_COLUMNS: &str = "id, name, email, password_hash, avatar_url, role, subcategory_id, \
                            created_at, updated_at, deleted_at";

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl UserRepository {
    /// Create a new user repository whose queries are bounded by `timeout`.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        let row = bounded(
            self.timeout,
            "Failed to find user by email",
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(email)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(User::from_row))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = bounded(
            self.timeout,
            "Failed to find user by id",
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(User::from_row))
    }

    async fn create(&self, user: &User) -> AppResult<()> {
        let row = user.to_row();
        bounded(
            self.timeout,
            "Failed to insert user",
            sqlx::query(
                "INSERT INTO users (id, name, email, password_hash, avatar_url, role, \
                 subcategory_id, created_at, updated_at, deleted_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(row.id)
            .bind(&row.name)
            .bind(&row.email)
            .bind(&row.password_hash)
            .bind(&row.avatar_url)
            .bind(row.role)
            .bind(row.subcategory_id)
            .bind(row.created_at)
            .bind(row.updated_at)
            .bind(row.deleted_at)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn list_professionals(&self) -> AppResult<Vec<Professional>> {
        bounded(
            self.timeout,
            "Failed to list professionals",
            sqlx::query_as::<_, Professional>(
                "SELECT u.id, u.name, u.email, u.avatar_url, \
                        s.id AS subcategory_id, s.name AS subcategory_name, \
                        c.id AS category_id, c.name AS category_name, u.created_at \
                 FROM users u \
                 JOIN subcategories s ON s.id = u.subcategory_id \
                 JOIN categories c ON c.id = s.category_id \
                 WHERE u.role = 'professional' AND u.deleted_at IS NULL \
                 ORDER BY u.name ASC",
            )
            .fetch_all(&self.pool),
        )
        .await
    }
}
