//! Read-only category catalog.

pub mod service;

pub use service::{CategoryListing, CategoryService};
