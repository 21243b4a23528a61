//! RSA signing keys loaded from configuration.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};

use servicehub_core::config::AuthConfig;
use servicehub_core::error::{AppError, ErrorKind};

const PEM_ARMOR: &str = "-----BEGIN";

/// An RSA key pair usable for RS256 signing and verification.
///
/// Built from the private key alone; the public half is derived.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Parse a private key given as PEM (PKCS#8 or PKCS#1), PEM with
    /// literal `\n` escapes, or base64-encoded PEM.
    pub fn from_pem(raw: &str) -> Result<Self, AppError> {
        let pem = normalize_pem(raw)?;

        let private = RsaPrivateKey::from_pkcs8_pem(&pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&pem))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid RSA private key", e)
            })?;

        let public_pem = private
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to derive RSA public key",
                    e,
                )
            })?;

        let encoding = EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Unusable RSA signing key", e)
        })?;
        let decoding = DecodingKey::from_rsa_pem(public_pem.as_bytes()).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Unusable RSA verification key", e)
        })?;

        Ok(Self { encoding, decoding })
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// The two independent keys: one for access tokens, one for refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenKeys {
    pub access: Arc<SigningKey>,
    pub refresh: Arc<SigningKey>,
}

impl TokenKeys {
    /// Load both keys from the auth configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_access_key.trim() == config.jwt_refresh_key.trim() {
            return Err(AppError::configuration(
                "Access and refresh tokens must use different signing keys",
            ));
        }

        Ok(Self {
            access: Arc::new(SigningKey::from_pem(&config.jwt_access_key)?),
            refresh: Arc::new(SigningKey::from_pem(&config.jwt_refresh_key)?),
        })
    }
}

fn normalize_pem(raw: &str) -> Result<String, AppError> {
    let raw = raw.trim().replace("\\n", "\n");
    if raw.is_empty() {
        return Err(AppError::configuration("RSA private key is empty"));
    }
    if raw.contains(PEM_ARMOR) {
        return Ok(raw);
    }

    let compact: String = raw.split_whitespace().collect();
    let decoded = STANDARD.decode(compact).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            "RSA private key is neither PEM nor base64-encoded PEM",
            e,
        )
    })?;
    let pem = String::from_utf8(decoded).map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, "Decoded RSA key is not UTF-8", e)
    })?;

    if !pem.contains(PEM_ARMOR) {
        return Err(AppError::configuration(
            "Decoded RSA private key is missing its PEM header",
        ));
    }
    Ok(pem)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_PEM: &str = include_str!("../../../../fixtures/keys/access.pem");

    #[test]
    fn test_loads_plain_pem() {
        assert!(SigningKey::from_pem(ACCESS_PEM).is_ok());
    }

    #[test]
    fn test_loads_escaped_newlines() {
        let escaped = ACCESS_PEM.trim().replace('\n', "\\n");
        assert!(SigningKey::from_pem(&escaped).is_ok());
    }

    #[test]
    fn test_loads_base64_pem() {
        let encoded = STANDARD.encode(ACCESS_PEM);
        assert!(SigningKey::from_pem(&encoded).is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        let err = SigningKey::from_pem("not a key").unwrap_err();
        assert!(err.is(ErrorKind::Configuration));

        let err = SigningKey::from_pem("").unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_token_keys_must_differ() {
        let config = AuthConfig {
            jwt_access_key: ACCESS_PEM.to_string(),
            jwt_refresh_key: ACCESS_PEM.to_string(),
            issuer: "user-service".to_string(),
            access_ttl_minutes: 2,
            refresh_ttl_days: 30,
            leeway_seconds: 5,
            cookie: Default::default(),
        };
        assert!(TokenKeys::from_config(&config).is_err());
    }
}
