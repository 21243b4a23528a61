//! # servicehub-entity
//!
//! Domain entity models for ServiceHub.
//!
//! Entities that carry invariants (`User`, `Session`) are immutable by
//! construction: their fields are private, they are validated when built,
//! and they expose read accessors. Each has a separate `*Row` type that
//! mirrors the storage shape and derives `sqlx::FromRow`.

pub mod category;
pub mod session;
pub mod user;
