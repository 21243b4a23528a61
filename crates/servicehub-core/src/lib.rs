//! # servicehub-core
//!
//! Core crate for ServiceHub. Contains configuration schemas, typed
//! identifiers, shared response types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ServiceHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
