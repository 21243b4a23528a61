//! Claims carried by access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use servicehub_core::types::id::{SubcategoryId, UserId};
use servicehub_entity::user::{User, UserRole};

/// Identity fields copied into a token at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<SubcategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            subcategory_id: user.subcategory_id(),
            avatar_url: user.avatar_url().map(str::to_string),
        }
    }
}

/// JWT payload shared by access and refresh tokens.
///
/// Refresh and access tokens differ only in lifetime and signing key. The
/// `jti` of a refresh token is the join key to its session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identity snapshot at issuance.
    pub user: UserSnapshot,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuing service.
    pub iss: String,
    /// Unique token id.
    pub jti: String,
}

impl TokenClaims {
    /// Returns the issued-at time.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    /// Returns the expiration time.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}
