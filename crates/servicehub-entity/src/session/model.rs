//! Session entity model.

use chrono::{DateTime, Duration, Utc};

use servicehub_core::types::id::{SessionId, UserId};
use servicehub_core::{AppError, AppResult};

use super::row::SessionRow;

/// One login lineage for a user.
///
/// The `jti` is the token id of the refresh token currently bound to the
/// session. At most one session per user is active at a time; the session
/// manager enforces this by deactivating every prior session before
/// creating a new one. Sessions are never deleted, only deactivated or
/// left to expire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    user_id: UserId,
    jti: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a new active session for `user_id`, bound to refresh token `jti`
    /// and expiring `ttl` from now.
    pub fn new(user_id: UserId, jti: impl Into<String>, ttl: Duration) -> AppResult<Self> {
        let jti = jti.into();
        if user_id.is_nil() {
            return Err(AppError::unprocessable_entity("session user id must not be empty"));
        }
        if jti.trim().is_empty() {
            return Err(AppError::unprocessable_entity("session jti must not be empty"));
        }

        let now = Utc::now();
        Ok(Self {
            id: SessionId::new(),
            user_id,
            jti,
            active: true,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
        })
    }

    /// Restore a persisted session.
    pub fn from_row(row: SessionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            jti: row.jti,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
        }
    }

    /// Storage shape of this session.
    pub fn to_row(&self) -> SessionRow {
        SessionRow {
            id: self.id,
            user_id: self.user_id,
            jti: self.jti.clone(),
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            expires_at: self.expires_at,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn jti(&self) -> &str {
        &self.jti
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the session had expired at `now`. Independent of the active flag.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Mark the session inactive. `expires_at` is left untouched.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    /// Mark the session active again.
    pub fn activate(&mut self) {
        self.active = true;
        self.updated_at = Utc::now();
    }

    /// Bind the session to a different refresh token id.
    pub fn change_jti(&mut self, jti: impl Into<String>) -> AppResult<()> {
        let jti = jti.into();
        if jti.trim().is_empty() {
            return Err(AppError::unprocessable_entity("session jti must not be empty"));
        }
        self.jti = jti;
        self.updated_at = Utc::now();
        Ok(())
    }
}
