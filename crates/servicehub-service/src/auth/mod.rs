//! Login, logout, token renewal, and request authentication.

pub mod service;

pub use service::{AuthService, LoginResult, RenewResult};
