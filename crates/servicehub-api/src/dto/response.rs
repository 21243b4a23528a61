//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use servicehub_entity::user::{Professional, User};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login response. The refresh token travels in a cookie only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The new session.
    pub session_id: Uuid,
    /// Access token.
    pub access_token: String,
}

/// Renewal response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// Access token.
    pub access_token: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// A user as shown to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// `client` or `professional`.
    pub role: String,
    /// Subcategory, for professionals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<Uuid>,
    /// Avatar location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().into_uuid(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
            subcategory_id: user.subcategory_id().map(|id| id.into_uuid()),
            avatar_url: user.avatar_url().map(str::to_string),
            created_at: user.created_at(),
        }
    }
}

/// Id and name of a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    /// ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
}

/// A professional in the public directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Avatar location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Subcategory they work in.
    pub subcategory: NamedRef,
    /// Category of that subcategory.
    pub category: NamedRef,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Professional> for ProfessionalResponse {
    fn from(p: Professional) -> Self {
        Self {
            id: p.id.into_uuid(),
            name: p.name,
            email: p.email,
            avatar_url: p.avatar_url,
            subcategory: NamedRef {
                id: p.subcategory_id.into_uuid(),
                name: p.subcategory_name,
            },
            category: NamedRef {
                id: p.category_id.into_uuid(),
                name: p.category_name,
            },
            created_at: p.created_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
