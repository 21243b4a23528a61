//! In-memory store using Tokio read-write locks.
//!
//! Implements every store contract with the same semantics as the
//! PostgreSQL repositories. Suitable for tests and single-process
//! experimentation only; nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use servicehub_core::error::AppError;
use servicehub_core::result::AppResult;
use servicehub_core::types::id::{CategoryId, SessionId, SubcategoryId, UserId};
use servicehub_entity::category::{
    Category, CategoryWithSubcategories, CategoryWithUserCount, Subcategory, SubcategorySummary,
};
use servicehub_entity::session::{Session, SessionRow};
use servicehub_entity::user::{Professional, User, UserRole, UserRow};

use crate::store::{CategoryStore, SessionStore, UserStore};

/// Tables held by the memory store, in their storage shapes.
#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, UserRow>,
    sessions: HashMap<SessionId, SessionRow>,
    categories: HashMap<CategoryId, Category>,
    subcategories: HashMap<SubcategoryId, Subcategory>,
}

/// In-memory implementation of [`UserStore`], [`SessionStore`], and
/// [`CategoryStore`]. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category.
    pub async fn add_category(&self, category: Category) {
        self.tables
            .write()
            .await
            .categories
            .insert(category.id, category);
    }

    /// Add a subcategory.
    pub async fn add_subcategory(&self, subcategory: Subcategory) {
        self.tables
            .write()
            .await
            .subcategories
            .insert(subcategory.id, subcategory);
    }

    /// Soft-delete a user.
    pub async fn soft_delete_user(&self, id: UserId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let row = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("user not found"))?;
        row.deleted_at = Some(chrono::Utc::now());
        Ok(())
    }
}

/// Case-insensitive email match, mirroring `LOWER(email)` in Postgres.
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|row| same_email(&row.email, email))
            .cloned()
            .map(User::from_row))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned().map(User::from_row))
    }

    async fn create(&self, user: &User) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|row| same_email(&row.email, user.email()))
        {
            return Err(AppError::conflict("email already taken"));
        }
        tables.users.insert(user.id(), user.to_row());
        Ok(())
    }

    async fn list_professionals(&self) -> AppResult<Vec<Professional>> {
        let tables = self.tables.read().await;
        let mut professionals: Vec<Professional> = tables
            .users
            .values()
            .filter(|row| row.role == UserRole::Professional && row.deleted_at.is_none())
            .filter_map(|row| {
                let sub = tables.subcategories.get(&row.subcategory_id?)?;
                let category = tables.categories.get(&sub.category_id)?;
                Some(Professional {
                    id: row.id,
                    name: row.name.clone(),
                    email: row.email.clone(),
                    avatar_url: row.avatar_url.clone(),
                    subcategory_id: sub.id,
                    subcategory_name: sub.name.clone(),
                    category_id: category.id,
                    category_name: category.name.clone(),
                    created_at: row.created_at,
                })
            })
            .collect();
        professionals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(professionals)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(&self, session: &Session) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.sessions.values().any(|row| row.jti == session.jti()) {
            return Err(AppError::database("Failed to insert session"));
        }
        tables.sessions.insert(session.id(), session.to_row());
        Ok(())
    }

    async fn update(&self, session: &Session) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let row = tables
            .sessions
            .get_mut(&session.id())
            .ok_or_else(|| AppError::not_found("session not found"))?;
        row.active = session.is_active();
        row.jti = session.jti().to_string();
        row.updated_at = session.updated_at();
        Ok(())
    }

    async fn find_by_id(&self, id: SessionId) -> AppResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables.sessions.get(&id).cloned().map(Session::from_row))
    }

    async fn find_active_by_user(&self, user_id: UserId) -> AppResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .values()
            .filter(|row| row.user_id == user_id && row.active)
            .max_by_key(|row| row.created_at)
            .cloned()
            .map(Session::from_row))
    }

    async fn find_by_jti(&self, jti: &str) -> AppResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .values()
            .find(|row| row.jti == jti)
            .cloned()
            .map(Session::from_row))
    }

    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Session>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<SessionRow> = tables
            .sessions
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows.into_iter().map(Session::from_row).collect())
    }

    async fn deactivate_all(&self, user_id: UserId) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let now = chrono::Utc::now();
        let mut changed = 0;
        for row in tables
            .sessions
            .values_mut()
            .filter(|row| row.user_id == user_id && row.active)
        {
            row.active = false;
            row.updated_at = now;
            changed += 1;
        }
        Ok(changed)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_with_user_count(&self) -> AppResult<Vec<CategoryWithUserCount>> {
        let tables = self.tables.read().await;
        let mut listed: Vec<CategoryWithUserCount> = tables
            .categories
            .values()
            .filter(|c| c.deleted_at.is_none())
            .map(|category| {
                let count = tables
                    .users
                    .values()
                    .filter(|u| u.deleted_at.is_none())
                    .filter_map(|u| u.subcategory_id)
                    .filter_map(|sid| tables.subcategories.get(&sid))
                    .filter(|s| s.deleted_at.is_none() && s.category_id == category.id)
                    .count();
                CategoryWithUserCount {
                    category: category.clone(),
                    subcategories_user_count: count as i64,
                }
            })
            .collect();
        listed.sort_by(|a, b| {
            b.subcategories_user_count
                .cmp(&a.subcategories_user_count)
                .then_with(|| a.category.name.cmp(&b.category.name))
        });
        Ok(listed)
    }

    async fn list_with_subcategories(&self) -> AppResult<Vec<CategoryWithSubcategories>> {
        let tables = self.tables.read().await;
        let mut listed: Vec<CategoryWithSubcategories> = tables
            .categories
            .values()
            .filter(|c| c.deleted_at.is_none())
            .map(|category| {
                let mut subcategories: Vec<SubcategorySummary> = tables
                    .subcategories
                    .values()
                    .filter(|s| s.category_id == category.id && s.deleted_at.is_none())
                    .map(SubcategorySummary::from)
                    .collect();
                subcategories.sort_by(|a, b| a.name.cmp(&b.name));
                CategoryWithSubcategories {
                    category: category.clone(),
                    subcategories,
                }
            })
            .collect();
        listed.sort_by(|a, b| a.category.name.cmp(&b.category.name));
        Ok(listed)
    }

    async fn subcategory_exists(&self, id: SubcategoryId) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .subcategories
            .get(&id)
            .is_some_and(|s| s.deleted_at.is_none()))
    }
}
