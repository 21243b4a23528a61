//! Store contracts consumed by the auth and service layers.
//!
//! Every lookup distinguishes absence (`Ok(None)`) from a storage failure
//! (`Err`). Implementations surface failures as `Database` errors that name
//! the operation; callers decide which kind to present to clients.

use async_trait::async_trait;

use servicehub_core::result::AppResult;
use servicehub_core::types::id::{SessionId, SubcategoryId, UserId};
use servicehub_entity::category::{CategoryWithSubcategories, CategoryWithUserCount};
use servicehub_entity::session::Session;
use servicehub_entity::user::{Professional, User};

/// Lookup and persistence of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by email, case-insensitively. Soft-deleted users are returned.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key. Soft-deleted users are returned.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Persist a new user. A duplicate email fails with `Conflict`.
    async fn create(&self, user: &User) -> AppResult<()>;

    /// Non-deleted professionals with their subcategory, ordered by name.
    async fn list_professionals(&self) -> AppResult<Vec<Professional>>;
}

/// Persistence of login sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Persist a new session.
    async fn insert(&self, session: &Session) -> AppResult<()>;

    /// Persist the mutable fields (active flag, JTI, updated-at) of a session.
    async fn update(&self, session: &Session) -> AppResult<()>;

    /// Find a session by primary key.
    async fn find_by_id(&self, id: SessionId) -> AppResult<Option<Session>>;

    /// The user's active session, newest first if several exist.
    async fn find_active_by_user(&self, user_id: UserId) -> AppResult<Option<Session>>;

    /// The session bound to a refresh token id.
    async fn find_by_jti(&self, jti: &str) -> AppResult<Option<Session>>;

    /// Every session of the user, newest first.
    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Session>>;

    /// Deactivate every active session of the user, returning how many changed.
    async fn deactivate_all(&self, user_id: UserId) -> AppResult<u64>;
}

/// Read-only access to the category tree.
#[async_trait]
pub trait CategoryStore: Send + Sync + 'static {
    /// Non-deleted categories with their active user count, busiest first.
    async fn list_with_user_count(&self) -> AppResult<Vec<CategoryWithUserCount>>;

    /// Non-deleted categories with their non-deleted subcategories, by name.
    async fn list_with_subcategories(&self) -> AppResult<Vec<CategoryWithSubcategories>>;

    /// Whether a non-deleted subcategory with this id exists.
    async fn subcategory_exists(&self, id: SubcategoryId) -> AppResult<bool>;
}
