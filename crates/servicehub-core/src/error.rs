//! Unified application error types for ServiceHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the `?` operator. Every [`ErrorKind`] carries a stable
//! machine-readable tag that the HTTP layer sends to clients.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Malformed input, or a storage failure during a precondition check.
    BadRequest,
    /// Bad credentials, an invalid or expired token, or a missing identity.
    Unauthorized,
    /// The account has been soft-deleted and may not authenticate.
    DisabledUser,
    /// The requested resource was not found.
    NotFound,
    /// A uniqueness rule was violated.
    Conflict,
    /// A domain object failed its own invariants at construction.
    UnprocessableEntity,
    /// An internal server error occurred (signing failure, unexpected fault).
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// Stable tag sent to clients in the `error` field of failure bodies.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST_ERROR",
            Self::Unauthorized => "UNAUTHORIZED_ERROR",
            Self::DisabledUser => "DISABLED_USER_ERROR",
            Self::NotFound => "NOT_FOUND_ERROR",
            Self::Conflict => "CONFLICT_ERROR",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY_ERROR",
            Self::Internal => "INTERNAL_SERVER_ERROR",
            Self::Database => "DATABASE_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Serialization => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this kind represents a server-side fault whose details must
    /// stay out of client responses.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Internal | Self::Database | Self::Configuration | Self::Serialization
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The unified application error used throughout ServiceHub.
///
/// `message` is always safe to show to a caller. Driver or library errors
/// travel in `source` and are only ever logged.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Re-categorize this error under a new kind and safe message, keeping
    /// the original error as the cause.
    pub fn remap(self, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::with_source(kind, message, self)
    }

    /// Create a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a disabled-user error.
    pub fn disabled_user(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DisabledUser, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an unprocessable-entity error.
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Returns `true` if this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, "JSON serialization error", err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
