//! The authenticated identity attached to a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use servicehub_auth::jwt::{TokenClaims, UserSnapshot};
use servicehub_core::types::id::UserId;
use servicehub_entity::user::UserRole;

/// Identity of the caller, produced by verifying their access token.
///
/// Built only by [`AuthService::authenticate`](crate::AuthService::authenticate)
/// and passed explicitly to operations that act on behalf of the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Identity snapshot from the access token.
    pub user: UserSnapshot,
    /// `jti` of the access token.
    pub token_id: String,
    /// When the access token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the access token expires.
    pub expires_at: DateTime<Utc>,
}

impl RequestContext {
    /// Builds a context from verified access-token claims.
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
            token_id: claims.jti,
            user: claims.user,
        }
    }

    /// The authenticated user's ID.
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    /// The user's role when the token was issued.
    pub fn role(&self) -> UserRole {
        self.user.role
    }
}
