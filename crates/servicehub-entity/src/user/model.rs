//! User entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use servicehub_core::types::id::{CategoryId, SubcategoryId, UserId};
use servicehub_core::{AppError, AppResult};

use super::role::UserRole;
use super::row::UserRow;

/// A registered account.
///
/// Built either through [`User::new`], which enforces the account
/// invariants, or restored from storage with [`User::from_row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
    avatar_url: Option<String>,
    role: UserRole,
    subcategory_id: Option<SubcategoryId>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Input for building a brand-new user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password hash in PHC string format.
    pub password_hash: String,
    /// Optional avatar location.
    pub avatar_url: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Subcategory, required for professionals and forbidden for clients.
    pub subcategory_id: Option<SubcategoryId>,
}

impl User {
    /// Build a new user, checking the account invariants.
    pub fn new(input: NewUser) -> AppResult<Self> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::unprocessable_entity("user name must not be empty"));
        }

        let email = input.email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::unprocessable_entity("user email must not be empty"));
        }

        if input.password_hash.is_empty() {
            return Err(AppError::unprocessable_entity("user password hash must not be empty"));
        }

        match (input.role.requires_subcategory(), input.subcategory_id) {
            (true, None) => {
                return Err(AppError::unprocessable_entity(
                    "professional users must have a subcategory",
                ));
            }
            (false, Some(_)) => {
                return Err(AppError::unprocessable_entity(
                    "client users cannot have a subcategory",
                ));
            }
            _ => {}
        }

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            password_hash: input.password_hash,
            avatar_url: input.avatar_url.filter(|url| !url.trim().is_empty()),
            role: input.role,
            subcategory_id: input.subcategory_id,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        })
    }

    /// Restore a persisted user without re-running the invariants.
    pub fn from_row(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            avatar_url: row.avatar_url,
            role: row.role,
            subcategory_id: row.subcategory_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }

    /// Storage shape of this user.
    pub fn to_row(&self) -> UserRow {
        UserRow {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            avatar_url: self.avatar_url.clone(),
            role: self.role,
            subcategory_id: self.subcategory_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn subcategory_id(&self) -> Option<SubcategoryId> {
        self.subcategory_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// A soft-deleted account may not log in.
    pub fn is_disabled(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A professional together with the subcategory they work in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Professional {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub subcategory_id: SubcategoryId,
    pub subcategory_name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}
