//! RS256 token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, Validation, decode};

use super::claims::TokenClaims;
use super::error::TokenError;
use super::keys::SigningKey;

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies tokens against whichever key the caller supplies.
///
/// Only RS256 is accepted, the issuer is pinned, and `exp` is checked with
/// a small leeway for clock skew.
#[derive(Clone)]
pub struct JwtDecoder {
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder requiring `issuer` and tolerating `leeway_seconds` of skew.
    pub fn new(issuer: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.leeway = leeway_seconds;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self { validation }
    }

    /// Verifies `token` with `key` and returns its claims.
    ///
    /// An optional `Bearer ` prefix is stripped first.
    pub fn verify(&self, key: &SigningKey, token: &str) -> Result<TokenClaims, TokenError> {
        let token = token.trim_start();
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        decode::<TokenClaims>(token, key.decoding(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            })
    }
}
