//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use servicehub_core::error::{AppError, ErrorKind};
use servicehub_core::types::response::ApiErrorResponse;

const GENERIC_SERVER_MESSAGE: &str = "internal server error";

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized | ErrorKind::DisabledUser => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders an error and its causes as one line for the logs.
fn error_chain(err: &AppError) -> String {
    let mut chain = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let message = if err.kind.is_server_fault() {
            tracing::error!(error = %error_chain(&err), "Internal server error");
            GENERIC_SERVER_MESSAGE.to_string()
        } else {
            if err.source.is_some() {
                tracing::debug!(error = %error_chain(&err), "Request failed");
            }
            err.message
        };

        let body = ApiErrorResponse {
            error: err.kind.tag().to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, ApiErrorResponse) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::BadRequest), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::DisabledUser), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::UnprocessableEntity),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(ErrorKind::Database),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_client_error_keeps_message_and_tag() {
        let (status, body) = body_of(AppError::disabled_user("user must be active to login")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "DISABLED_USER_ERROR");
        assert_eq!(body.message, "user must be active to login");
    }

    #[tokio::test]
    async fn test_server_fault_hides_details() {
        let err = AppError::database("Failed to find session by jti: timed out after 2000ms");
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(body.message, GENERIC_SERVER_MESSAGE);
    }

    #[test]
    fn test_error_chain_includes_causes() {
        let err = AppError::database("Failed to update session")
            .remap(ErrorKind::BadRequest, "failed to deactivate session");
        let chain = error_chain(&err);
        assert!(chain.starts_with("BAD_REQUEST_ERROR: failed to deactivate session"));
        assert!(chain.contains("Failed to update session"));
    }
}
