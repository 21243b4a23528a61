//! Token verification and signing failures.

use thiserror::Error;

/// Why a token could not be produced or accepted.
///
/// `Expired` is kept apart from `Invalid` so callers can tell a stale but
/// genuine token from a forged or malformed one.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No token was presented, or it was blank.
    #[error("token is empty")]
    Empty,
    /// The signature is valid but `exp` has passed.
    #[error("token has expired")]
    Expired,
    /// Bad signature, wrong algorithm, wrong issuer, or malformed token.
    #[error("invalid token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    /// Signing failed, usually because of unusable key material.
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// Returns `true` for the expired condition.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}
