//! Account registration and user reads.

pub mod service;

pub use service::{RegisterUser, UserService};
