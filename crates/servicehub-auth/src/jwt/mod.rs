//! RS256 token encoding, decoding, keys, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod keys;

pub use claims::{TokenClaims, UserSnapshot};
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};
pub use error::TokenError;
pub use keys::{SigningKey, TokenKeys};
