//! Request DTOs with validation.
//!
//! These checks only bound field sizes. The domain rules, and the order
//! they are reported in, live in the services.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use servicehub_core::types::id::SubcategoryId;
use servicehub_service::RegisterUser;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(max = 255, message = "email is too long"))]
    pub email: String,
    /// Password.
    #[validate(length(max = 128, message = "password is too long"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    #[validate(length(max = 100, message = "name is too long"))]
    pub name: String,
    /// Email.
    #[serde(default)]
    #[validate(length(max = 255, message = "email is too long"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(max = 128, message = "password is too long"))]
    pub password: String,
    /// Password confirmation.
    #[serde(default)]
    pub confirm_password: String,
    /// `client` or `professional`.
    #[serde(default)]
    pub role: String,
    /// Subcategory, for professionals.
    pub subcategory_id: Option<Uuid>,
    /// Avatar location.
    #[validate(url(message = "avatar_url must be a valid URL"))]
    pub avatar_url: Option<String>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
            role: req.role,
            subcategory_id: req.subcategory_id.map(SubcategoryId::from_uuid),
            avatar_url: req.avatar_url,
        }
    }
}

/// Query string of the category listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryQuery {
    /// `subcategories` to embed subcategories instead of user counts.
    pub include: Option<String>,
}

impl CategoryQuery {
    /// Whether subcategories were requested.
    pub fn include_subcategories(&self) -> bool {
        self.include
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("subcategories"))
    }
}
