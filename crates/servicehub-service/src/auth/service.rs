//! Authentication flows: login, logout, access token renewal, and
//! verification of presented access tokens.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use servicehub_auth::jwt::{JwtDecoder, JwtEncoder, TokenError, TokenKeys, UserSnapshot};
use servicehub_auth::password::{CredentialValidator, PasswordHasher};
use servicehub_auth::session::SessionManager;
use servicehub_core::config::AuthConfig;
use servicehub_core::error::{AppError, ErrorKind};
use servicehub_core::result::AppResult;
use servicehub_core::types::id::SessionId;
use servicehub_database::store::UserStore;

use crate::context::RequestContext;

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Outcome of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// The newly created session.
    pub session_id: SessionId,
    /// Identity embedded in both tokens.
    pub user: UserSnapshot,
    /// Short-lived bearer token.
    pub access_token: String,
    /// When the access token expires.
    pub access_expires_at: DateTime<Utc>,
    /// Long-lived token bound to the session.
    #[serde(skip_serializing)]
    pub refresh_token: String,
    /// When the refresh token expires.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Outcome of a successful access token renewal.
#[derive(Debug, Clone, Serialize)]
pub struct RenewResult {
    /// Fresh short-lived bearer token.
    pub access_token: String,
    /// When it expires.
    pub access_expires_at: DateTime<Utc>,
}

/// Coordinates credentials, tokens, and sessions for one auth lineage per user.
///
/// A user either has no active session or exactly one. Login replaces it,
/// logout ends it, and renewal issues a new access token against it.
#[derive(Clone)]
pub struct AuthService {
    /// Account lookup.
    users: Arc<dyn UserStore>,
    /// Session lifecycle.
    sessions: Arc<SessionManager>,
    /// Credential shape checks.
    validator: Arc<CredentialValidator>,
    /// Password verification.
    hasher: Arc<PasswordHasher>,
    /// Token signing.
    encoder: Arc<JwtEncoder>,
    /// Token verification.
    decoder: Arc<JwtDecoder>,
    /// Access and refresh signing keys.
    keys: TokenKeys,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("sessions", &self.sessions)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<SessionManager>,
        validator: Arc<CredentialValidator>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        keys: TokenKeys,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            validator,
            hasher,
            encoder,
            decoder,
            keys,
            access_ttl: Duration::minutes(config.access_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_ttl_days),
        }
    }

    /// Refresh token lifetime, for callers that set the cookie max-age.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Performs the complete login flow:
    ///
    /// 1. Validate the credential shape before touching storage
    /// 2. Look up the user by email
    /// 3. Verify the password
    /// 4. Refuse soft-deleted accounts
    /// 5. Deactivate every existing session of the user
    /// 6. Issue an access token and a refresh token
    /// 7. Create a session keyed by the refresh token's `jti`
    ///
    /// Unknown emails and wrong passwords fail identically. Nothing is
    /// returned unless the new session was persisted.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        // Step 1: Shape checks
        self.validator.validate_credentials(email, password)?;

        // Step 2: Find user
        let user = self
            .users
            .find_by_email(email.trim())
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to get user by email"))?;

        // Step 3: Verify password
        let Some(user) = user.filter(|u| self.hasher.matches(password, u.password_hash())) else {
            warn!("Login rejected: invalid credentials");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        // Step 4: Check account status
        if user.is_disabled() {
            warn!(user_id = %user.id(), "Login rejected: account disabled");
            return Err(AppError::disabled_user("user must be active to login"));
        }

        // Step 5: Enforce a single active session
        self.sessions
            .deactivate_all_sessions(user.id())
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to deactivate user sessions"))?;

        // Step 6: Issue tokens
        let snapshot = UserSnapshot::from(&user);
        let access = self
            .encoder
            .generate(&self.keys.access, &snapshot, self.access_ttl)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "failed to login", e))?;
        let refresh = self
            .encoder
            .generate(&self.keys.refresh, &snapshot, self.refresh_ttl)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "failed to login", e))?;

        // Step 7: Bind the refresh token to a new session
        let session = self
            .sessions
            .create_session(user.id(), &refresh.claims.jti)
            .await?;

        info!(user_id = %user.id(), session_id = %session.id(), "Login successful");

        Ok(LoginResult {
            session_id: session.id(),
            user: snapshot,
            access_token: access.token,
            access_expires_at: access.claims.expires_at(),
            refresh_token: refresh.token,
            refresh_expires_at: refresh.claims.expires_at(),
        })
    }

    /// Ends the caller's active session.
    ///
    /// Logging out without an active session is reported as `NotFound`.
    pub async fn logout(&self, ctx: &RequestContext) -> AppResult<()> {
        let user_id = ctx.user_id();

        let mut session = self
            .sessions
            .get_active_session_by_user_id(user_id)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to retrieve active session"))?
            .ok_or_else(|| AppError::not_found("active session not found"))?;

        session.deactivate();
        let session = self
            .sessions
            .update_session(session)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to deactivate session"))?;

        info!(user_id = %user_id, session_id = %session.id(), "Logout completed");
        Ok(())
    }

    /// Issues a new access token for a still-valid refresh token.
    ///
    /// The new token carries the identity snapshot from the refresh token;
    /// the user record is not re-read. The session and refresh token are
    /// left unchanged.
    pub async fn renew_access_token(&self, refresh_token: &str) -> AppResult<RenewResult> {
        // Step 1: Verify the refresh token
        let claims = self
            .decoder
            .verify(&self.keys.refresh, refresh_token)
            .map_err(|e| match e {
                TokenError::Expired => AppError::unauthorized("refresh token has expired"),
                other => AppError::with_source(
                    ErrorKind::Unauthorized,
                    "invalid refresh token",
                    other,
                ),
            })?;

        // Step 2: The session bound to it must exist and be active
        let session = self
            .sessions
            .get_by_jti(&claims.jti)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "invalid or inactive session"))?
            .filter(|s| s.is_active())
            .ok_or_else(|| {
                debug!(user_id = %claims.user.id, "Renewal rejected: no active session for token");
                AppError::bad_request("invalid or inactive session")
            })?;

        // Step 3: Session expiry is checked independently of the active flag
        if session.is_expired() {
            warn!(session_id = %session.id(), "Renewal rejected: session expired");
            return Err(AppError::unauthorized("session expired"));
        }

        // Step 4: Issue from the embedded snapshot
        let access = self
            .encoder
            .generate(&self.keys.access, &claims.user, self.access_ttl)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "failed to generate access token", e)
            })?;

        debug!(user_id = %claims.user.id, session_id = %session.id(), "Access token renewed");

        Ok(RenewResult {
            access_token: access.token,
            access_expires_at: access.claims.expires_at(),
        })
    }

    /// Verifies a presented access token (optionally `Bearer `-prefixed)
    /// and returns the caller's identity.
    pub fn authenticate(&self, access_token: &str) -> AppResult<RequestContext> {
        self.decoder
            .verify(&self.keys.access, access_token)
            .map(RequestContext::from_claims)
            .map_err(|e| match e {
                TokenError::Empty => AppError::unauthorized("access token not provided"),
                TokenError::Expired => AppError::unauthorized("token has expired"),
                other => {
                    AppError::with_source(ErrorKind::Unauthorized, "invalid access token", other)
                }
            })
    }
}
