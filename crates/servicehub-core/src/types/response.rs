//! Response types shared by the HTTP layer.

use serde::{Deserialize, Serialize};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error tag, e.g. `UNAUTHORIZED_ERROR`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}
