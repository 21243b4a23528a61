//! RS256 token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, Header, encode};
use uuid::Uuid;

use super::claims::{TokenClaims, UserSnapshot};
use super::error::TokenError;
use super::keys::SigningKey;

/// A freshly signed token with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Claims embedded in `token`.
    pub claims: TokenClaims,
}

/// Signs tokens with whichever key the caller supplies.
#[derive(Debug, Clone)]
pub struct JwtEncoder {
    /// Value of the `iss` claim.
    issuer: String,
}

impl JwtEncoder {
    /// Creates an encoder that stamps tokens with `issuer`.
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
        }
    }

    /// Signs a token for `user` that expires `ttl` from now, with a fresh
    /// random `jti`.
    pub fn generate(
        &self,
        key: &SigningKey,
        user: &UserSnapshot,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            user: user.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::RS256), &claims, key.encoding())
            .map_err(TokenError::Signing)?;

        Ok(IssuedToken { token, claims })
    }
}
