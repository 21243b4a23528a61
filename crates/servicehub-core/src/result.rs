//! Convenience result type alias for ServiceHub.

use crate::error::AppError;

/// A specialized `Result` type for ServiceHub operations.
pub type AppResult<T> = Result<T, AppError>;
