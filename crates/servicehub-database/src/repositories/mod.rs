//! PostgreSQL implementations of the store contracts.

pub mod category;
pub mod session;
pub mod user;

use std::future::Future;
use std::time::Duration;

use servicehub_core::error::{AppError, ErrorKind};
use servicehub_core::result::AppResult;

pub use category::CategoryRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

/// Unique index enforcing one account per email, case-insensitively.
const USERS_EMAIL_KEY: &str = "users_email_key";

/// Run a query under the per-call timeout, mapping driver failures and
/// timeouts to `Database` errors that name the operation.
pub(crate) async fn bounded<T, F>(
    timeout: Duration,
    operation: &'static str,
    query: F,
) -> AppResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, query).await {
        Ok(result) => result.map_err(|e| map_sqlx_error(operation, e)),
        Err(elapsed) => Err(AppError::with_source(
            ErrorKind::Database,
            format!("{operation}: timed out after {}ms", timeout.as_millis()),
            elapsed,
        )),
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.constraint() == Some(USERS_EMAIL_KEY) {
            return AppError::with_source(ErrorKind::Conflict, "email already taken", err);
        }
    }
    AppError::with_source(ErrorKind::Database, operation, err)
}
