//! # servicehub-auth
//!
//! Authentication building blocks for ServiceHub.
//!
//! ## Modules
//!
//! - `jwt` — RS256 token generation and verification, parameterized per call by signing key
//! - `password` — Argon2id password hashing and credential shape validation
//! - `session` — Session lifecycle and the single-active-session invariant

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{
    IssuedToken, JwtDecoder, JwtEncoder, SigningKey, TokenClaims, TokenError, TokenKeys,
    UserSnapshot,
};
pub use password::{CredentialValidator, PasswordHasher};
pub use session::SessionManager;
