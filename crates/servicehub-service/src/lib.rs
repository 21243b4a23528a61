//! # servicehub-service
//!
//! Business logic service layer for ServiceHub. Each service orchestrates
//! stores and auth primitives to implement an application use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! once at process start via `Arc` references and shared across requests.

pub mod auth;
pub mod category;
pub mod context;
pub mod user;

pub use auth::{AuthService, LoginResult, RenewResult};
pub use category::{CategoryListing, CategoryService};
pub use context::RequestContext;
pub use user::{RegisterUser, UserService};
