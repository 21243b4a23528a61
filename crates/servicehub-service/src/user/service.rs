//! Account registration, profile reads, and the professionals directory.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use servicehub_auth::password::{CredentialValidator, PasswordHasher};
use servicehub_core::error::{AppError, ErrorKind};
use servicehub_core::result::AppResult;
use servicehub_core::types::id::SubcategoryId;
use servicehub_database::store::{CategoryStore, UserStore};
use servicehub_entity::user::{NewUser, Professional, User, UserRole};

use crate::context::RequestContext;

/// Registration input as submitted by a prospective user.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
    /// `client` or `professional`.
    pub role: String,
    /// Required for professionals, forbidden for clients.
    #[serde(default)]
    pub subcategory_id: Option<SubcategoryId>,
    /// Optional avatar location.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Handles account creation and user reads.
#[derive(Clone)]
pub struct UserService {
    /// Account persistence.
    users: Arc<dyn UserStore>,
    /// Subcategory existence checks.
    categories: Arc<dyn CategoryStore>,
    /// Credential shape checks.
    validator: Arc<CredentialValidator>,
    /// Password hashing.
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        categories: Arc<dyn CategoryStore>,
        validator: Arc<CredentialValidator>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            categories,
            validator,
            hasher,
        }
    }

    /// Registers a new account.
    ///
    /// Input checks run before any storage access, in a fixed order, so the
    /// first failing rule is the one reported.
    pub async fn register(&self, input: RegisterUser) -> AppResult<User> {
        // Step 1: Name
        if input.name.trim().is_empty() {
            return Err(AppError::bad_request("name is required"));
        }

        // Step 2: Credential shape
        let email = input.email.trim();
        self.validator.validate_credentials(email, &input.password)?;

        // Step 3: Confirmation
        if input.password != input.confirm_password {
            return Err(AppError::bad_request("passwords do not match"));
        }

        // Step 4-6: Role and subcategory pairing
        let role: UserRole = input.role.parse()?;
        match (role.requires_subcategory(), input.subcategory_id) {
            (false, Some(_)) => {
                return Err(AppError::bad_request("client users cannot have a subcategory"));
            }
            (true, None) => {
                return Err(AppError::bad_request("professional users must have a subcategory"));
            }
            _ => {}
        }

        // Step 7: Subcategory must exist
        if let Some(subcategory_id) = input.subcategory_id {
            let exists = self
                .categories
                .subcategory_exists(subcategory_id)
                .await
                .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to get subcategory"))?;
            if !exists {
                return Err(AppError::bad_request("subcategory not found"));
            }
        }

        // Step 8: Email must be free
        let existing = self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to get user by email"))?;
        if existing.is_some() {
            warn!("Registration rejected: email already taken");
            return Err(AppError::conflict("email already taken"));
        }

        // Step 9: Hash
        let password_hash = self.hasher.hash(&input.password)?;

        // Step 10: Build the entity
        let user = User::new(NewUser {
            name: input.name,
            email: email.to_string(),
            password_hash,
            avatar_url: input.avatar_url,
            role,
            subcategory_id: input.subcategory_id,
        })?;

        // Step 11: Persist
        self.users.create(&user).await.map_err(|e| {
            if e.is(ErrorKind::Conflict) {
                e
            } else {
                e.remap(ErrorKind::BadRequest, "failed to create user")
            }
        })?;

        info!(user_id = %user.id(), role = %user.role(), "User registered");
        Ok(user)
    }

    /// Returns the caller's own account.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id())
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to get user"))?
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    /// Lists active professionals with their subcategory, by name.
    pub async fn list_professionals(&self) -> AppResult<Vec<Professional>> {
        self.users
            .list_professionals()
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to list professionals"))
    }
}
