//! Session lifecycle manager and the single-active-session invariant.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use servicehub_core::config::SessionConfig;
use servicehub_core::error::ErrorKind;
use servicehub_core::result::AppResult;
use servicehub_core::types::id::UserId;
use servicehub_database::store::SessionStore;
use servicehub_entity::session::Session;

/// Owns every read and write of session records.
///
/// Storage failures come back as `BadRequest` with a safe message; the
/// underlying error is kept as the source for logging.
#[derive(Clone)]
pub struct SessionManager {
    /// Session persistence.
    store: Arc<dyn SessionStore>,
    /// Lifetime of a new session.
    ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager over `store`.
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            ttl: Duration::days(config.ttl_days),
        }
    }

    /// Creates and persists an active session bound to refresh token `jti`.
    pub async fn create_session(&self, user_id: UserId, jti: &str) -> AppResult<Session> {
        let session = Session::new(user_id, jti, self.ttl).map_err(|e| {
            e.remap(ErrorKind::UnprocessableEntity, "failed to create session entity")
        })?;

        self.store
            .insert(&session)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to insert session entity"))?;

        info!(
            user_id = %user_id,
            session_id = %session.id(),
            expires_at = %session.expires_at(),
            "Session created"
        );
        Ok(session)
    }

    /// Deactivates every active session of the user. A user with no
    /// sessions is a successful no-op.
    pub async fn deactivate_all_sessions(&self, user_id: UserId) -> AppResult<u64> {
        let changed = self
            .store
            .deactivate_all(user_id)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to deactivate all user sessions"))?;

        debug!(user_id = %user_id, deactivated = changed, "Deactivated user sessions");
        Ok(changed)
    }

    /// The user's active session, or `None` if there is none.
    pub async fn get_active_session_by_user_id(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<Session>> {
        self.store
            .find_active_by_user(user_id)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to get active session"))
    }

    /// The session bound to refresh token `jti`, active or not.
    pub async fn get_by_jti(&self, jti: &str) -> AppResult<Option<Session>> {
        self.store
            .find_by_jti(jti)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to get session by jti"))
    }

    /// Persists the active flag, JTI, and updated-at of `session`.
    pub async fn update_session(&self, session: Session) -> AppResult<Session> {
        self.store
            .update(&session)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to update session"))?;
        Ok(session)
    }

    /// Every session of the user, newest first.
    pub async fn list_sessions(&self, user_id: UserId) -> AppResult<Vec<Session>> {
        self.store
            .find_all_by_user(user_id)
            .await
            .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to list user sessions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use servicehub_core::error::AppError;
    use servicehub_core::types::id::SessionId;
    use servicehub_database::MemoryStore;

    fn manager(store: Arc<dyn SessionStore>) -> SessionManager {
        SessionManager::new(store, &SessionConfig::default())
    }

    /// A session store whose every call fails.
    struct BrokenStore;

    #[async_trait]
    impl SessionStore for BrokenStore {
        async fn insert(&self, _: &Session) -> AppResult<()> {
            Err(AppError::database("Failed to insert session: connection reset"))
        }
        async fn update(&self, _: &Session) -> AppResult<()> {
            Err(AppError::database("Failed to update session: connection reset"))
        }
        async fn find_by_id(&self, _: SessionId) -> AppResult<Option<Session>> {
            Err(AppError::database("Failed to find session: connection reset"))
        }
        async fn find_active_by_user(&self, _: UserId) -> AppResult<Option<Session>> {
            Err(AppError::database("Failed to find session: connection reset"))
        }
        async fn find_by_jti(&self, _: &str) -> AppResult<Option<Session>> {
            Err(AppError::database("Failed to find session: connection reset"))
        }
        async fn find_all_by_user(&self, _: UserId) -> AppResult<Vec<Session>> {
            Err(AppError::database("Failed to list sessions: connection reset"))
        }
        async fn deactivate_all(&self, _: UserId) -> AppResult<u64> {
            Err(AppError::database("Failed to deactivate: connection reset"))
        }
    }

    #[tokio::test]
    async fn test_create_session_defaults() {
        let manager = manager(Arc::new(MemoryStore::new()));
        let user_id = UserId::new();

        let session = manager.create_session(user_id, "jti-1").await.unwrap();

        assert!(session.is_active());
        assert_eq!(session.expires_at() - session.created_at(), Duration::days(30));
        let found = manager.get_by_jti("jti-1").await.unwrap().unwrap();
        assert_eq!(found.id(), session.id());
    }

    #[tokio::test]
    async fn test_create_session_rejects_empty_inputs() {
        let manager = manager(Arc::new(MemoryStore::new()));

        let err = manager.create_session(UserId::nil(), "jti").await.unwrap_err();
        assert!(err.is(ErrorKind::UnprocessableEntity));

        let err = manager.create_session(UserId::new(), "").await.unwrap_err();
        assert!(err.is(ErrorKind::UnprocessableEntity));
        assert_eq!(err.message, "failed to create session entity");
    }

    #[tokio::test]
    async fn test_single_active_session_after_deactivate_then_create() {
        let manager = manager(Arc::new(MemoryStore::new()));
        let user_id = UserId::new();

        let mut last = None;
        for i in 0..3 {
            manager.deactivate_all_sessions(user_id).await.unwrap();
            last = Some(manager.create_session(user_id, &format!("jti-{i}")).await.unwrap());
        }

        let sessions = manager.list_sessions(user_id).await.unwrap();
        assert_eq!(sessions.len(), 3);
        let active: Vec<_> = sessions.iter().filter(|s| s.is_active()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id(), last.unwrap().id());
    }

    #[tokio::test]
    async fn test_deactivate_all_without_sessions_is_noop() {
        let manager = manager(Arc::new(MemoryStore::new()));
        assert_eq!(manager.deactivate_all_sessions(UserId::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_lookups_are_none() {
        let manager = manager(Arc::new(MemoryStore::new()));
        assert!(manager.get_active_session_by_user_id(UserId::new()).await.unwrap().is_none());
        assert!(manager.get_by_jti("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_persists_deactivation() {
        let manager = manager(Arc::new(MemoryStore::new()));
        let user_id = UserId::new();
        let mut session = manager.create_session(user_id, "jti").await.unwrap();

        session.deactivate();
        manager.update_session(session).await.unwrap();

        assert!(manager.get_active_session_by_user_id(user_id).await.unwrap().is_none());
        assert!(!manager.get_by_jti("jti").await.unwrap().unwrap().is_active());
    }

    #[tokio::test]
    async fn test_storage_failures_become_bad_request_without_driver_text() {
        let manager = manager(Arc::new(BrokenStore));
        let user_id = UserId::new();

        let err = manager.create_session(user_id, "jti").await.unwrap_err();
        assert!(err.is(ErrorKind::BadRequest));
        assert_eq!(err.message, "failed to insert session entity");

        let err = manager.deactivate_all_sessions(user_id).await.unwrap_err();
        assert!(err.is(ErrorKind::BadRequest));
        assert!(!err.message.contains("connection reset"));

        let err = manager.get_by_jti("jti").await.unwrap_err();
        assert!(err.is(ErrorKind::BadRequest));
    }
}
