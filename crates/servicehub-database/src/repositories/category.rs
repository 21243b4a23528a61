//! Category repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use servicehub_core::result::AppResult;
use servicehub_core::types::id::SubcategoryId;
use servicehub_entity::category::{
    Category, CategoryWithSubcategories, CategoryWithUserCount, SubcategorySummary,
};

use super::bounded;
use crate::store::CategoryStore;

/// A category row with its subcategories aggregated into a JSON array.
#[derive(FromRow)]
struct CategoryTreeRow {
    #[sqlx(flatten)]
    category: Category,
    subcategories: Json<Vec<SubcategorySummary>>,
}

/// PostgreSQL-backed [`CategoryStore`].
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
    timeout: Duration,
}

impl CategoryRepository {
    /// Create a new category repository whose queries are bounded by `timeout`.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn list_with_user_count(&self) -> AppResult<Vec<CategoryWithUserCount>> {
        bounded(
            self.timeout,
            "Failed to list categories",
            sqlx::query_as::<_, CategoryWithUserCount>(
                "SELECT c.id, c.name, c.icon, c.created_at, c.updated_at, c.deleted_at, \
                        COUNT(u.id) AS subcategories_user_count \
                 FROM categories c \
                 LEFT JOIN subcategories s ON s.category_id = c.id AND s.deleted_at IS NULL \
                 LEFT JOIN users u ON u.subcategory_id = s.id AND u.deleted_at IS NULL \
                 WHERE c.deleted_at IS NULL \
                 GROUP BY c.id \
                 ORDER BY subcategories_user_count DESC, c.name ASC",
            )
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn list_with_subcategories(&self) -> AppResult<Vec<CategoryWithSubcategories>> {
        let rows = bounded(
            self.timeout,
            "Failed to list categories with subcategories",
            sqlx::query_as::<_, CategoryTreeRow>(
                "SELECT c.id, c.name, c.icon, c.created_at, c.updated_at, c.deleted_at, \
                        COALESCE( \
                            JSON_AGG(JSON_BUILD_OBJECT('id', s.id, 'name', s.name) ORDER BY s.name) \
                                FILTER (WHERE s.id IS NOT NULL), \
                            '[]'::json \
                        ) AS subcategories \
                 FROM categories c \
                 LEFT JOIN subcategories s ON s.category_id = c.id AND s.deleted_at IS NULL \
                 WHERE c.deleted_at IS NULL \
                 GROUP BY c.id \
                 ORDER BY c.name ASC",
            )
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryWithSubcategories {
                category: row.category,
                subcategories: row.subcategories.0,
            })
            .collect())
    }

    async fn subcategory_exists(&self, id: SubcategoryId) -> AppResult<bool> {
        bounded(
            self.timeout,
            "Failed to look up subcategory",
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM subcategories WHERE id = $1 AND deleted_at IS NULL)",
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await
    }
}
