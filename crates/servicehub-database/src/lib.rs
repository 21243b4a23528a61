//! # servicehub-database
//!
//! Storage for ServiceHub: the store contracts consumed by the auth and
//! service layers, their PostgreSQL implementations, and an in-memory
//! implementation with identical semantics.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{CategoryRepository, SessionRepository, UserRepository};
pub use store::{CategoryStore, SessionStore, UserStore};
