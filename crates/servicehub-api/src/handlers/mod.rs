//! Route handlers organized by domain.

pub mod auth;
pub mod category;
pub mod health;
pub mod user;
