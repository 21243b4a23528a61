//! Core type definitions used across the ServiceHub workspace.

pub mod id;
pub mod response;

pub use id::*;
pub use response::ApiErrorResponse;
